use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};

use crate::repository::DieselRepository;
use crate::routes::ApiResponse;
use crate::services::health::check_health;

#[get("/health")]
pub async fn health(repo: web::Data<DieselRepository>) -> impl Responder {
    let report = check_health(repo.get_ref());
    let (status, message) = if report.is_healthy() {
        (StatusCode::OK, "Service is healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database is unavailable")
    };

    let mut body = ApiResponse::success(message, report);
    body.success = status.is_success();
    HttpResponse::build(status).json(body)
}
