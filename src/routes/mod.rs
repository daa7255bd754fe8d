//! HTTP surface: the response envelope, extractor error handling and the
//! per-resource handlers.

use std::collections::HashMap;

use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Scope, web};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::forms::FormError;
use crate::forms::image::ImageUpload;
use crate::pagination::{Page, PaginationMeta};
use crate::repository::ListQuery;
use crate::services::ServiceError;

pub mod blogs;
pub mod contact;
pub mod courses;
pub mod health;
pub mod images;
pub mod newsletter;
pub mod users;

pub const RESOURCE_NOT_FOUND: &str = "The requested resource does not exist";

/// Multipart bodies larger than this are rejected before any field limit.
const MULTIPART_TOTAL_LIMIT: usize = 6 * 1024 * 1024;

/// Uniform JSON envelope for every response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            pagination: None,
            count: None,
            error: None,
            timestamp: timestamp(),
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            pagination: None,
            count: None,
            error: Some(error),
            timestamp: timestamp(),
        }
    }
}

/// ISO-8601 UTC timestamp with millisecond precision.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(message, data))
}

pub fn created<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(message, data))
}

/// Unpaginated listing; carries the number of items.
pub fn listed<T: Serialize>(message: &str, items: Vec<T>) -> HttpResponse {
    let count = items.len();
    HttpResponse::Ok().json(ApiResponse::success(message, items).with_count(count))
}

/// One page of a filtered listing with its pagination block.
pub fn paged<T: Serialize>(message: &str, page: Page<T>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(message, page.items).with_pagination(page.meta))
}

fn failure(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    let label = status.canonical_reason().unwrap_or("Error");
    HttpResponse::build(status).json(ApiResponse::failure(label, message))
}

pub fn bad_request(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::BAD_REQUEST, message)
}

pub fn not_found(message: impl Into<String>) -> HttpResponse {
    failure(StatusCode::NOT_FOUND, message)
}

/// Renders a service failure. Internal details are logged and replaced with
/// `fallback`.
pub fn error_response(err: ServiceError, fallback: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => bad_request(message),
        ServiceError::NotFound(message) => not_found(message),
        ServiceError::Conflict(message) => failure(StatusCode::CONFLICT, message),
        ServiceError::Upstream(message) => failure(StatusCode::BAD_GATEWAY, message),
        ServiceError::Internal(detail) => {
            log::error!("{fallback}: {detail}");
            failure(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}

/// Query-string parameters of list endpoints.
pub type ListParams = web::Query<HashMap<String, String>>;

pub fn list_query(params: ListParams) -> ListQuery {
    ListQuery::from(params.into_inner())
}

/// Validates a multipart image form and reads its temp file on the blocking
/// thread pool.
pub async fn read_upload<F>(form: F) -> Result<ImageUpload, ServiceError>
where
    F: Send + 'static,
    ImageUpload: TryFrom<F, Error = FormError>,
{
    match web::block(move || ImageUpload::try_from(form)).await {
        Ok(upload) => upload.map_err(ServiceError::from),
        Err(e) => Err(ServiceError::Internal(e.to_string())),
    }
}

/// Fallback for unmatched routes.
pub async fn default_not_found() -> HttpResponse {
    not_found(RESOURCE_NOT_FOUND)
}

/// Registers the envelope-producing handlers for extractor failures.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("Invalid JSON body: {err}"));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = bad_request(format!("Invalid query string: {err}"));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = not_found(RESOURCE_NOT_FOUND);
        InternalError::from_response(err, response).into()
    }))
    .app_data(
        MultipartFormConfig::default()
            .total_limit(MULTIPART_TOTAL_LIMIT)
            .error_handler(|err, _req| {
                let response = bad_request(format!("Invalid upload: {err}"));
                InternalError::from_response(err, response).into()
            }),
    );
}

/// All API routes mounted under `/api/{api_version}`.
///
/// Literal segments (`/filtered`, `/stats/summary`, `/instructors`) are
/// registered before the `{id}` patterns they would otherwise collide with.
pub fn api_scope(api_version: &str) -> Scope {
    web::scope(&format!("/api/{api_version}"))
        .configure(configure_extractors)
        .service(health::health)
        .service(blogs::list_all_blogs)
        .service(blogs::list_filtered_blogs)
        .service(blogs::get_blog_by_slug)
        .service(blogs::create_blog)
        .service(blogs::create_blog_alias)
        .service(blogs::get_blog)
        .service(blogs::update_blog)
        .service(blogs::delete_blog)
        .service(courses::list_all_courses)
        .service(courses::list_filtered_courses)
        .service(courses::list_courses_by_category)
        .service(courses::create_course)
        .service(courses::get_course)
        .service(courses::update_course)
        .service(courses::delete_course)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::list_instructors)
        .service(users::get_user_by_email)
        .service(users::upload_profile_image)
        .service(users::update_user_status)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(newsletter::list_subscribers)
        .service(newsletter::subscriber_stats)
        .service(newsletter::subscribe)
        .service(newsletter::confirm)
        .service(newsletter::unsubscribe)
        .service(newsletter::get_subscriber)
        .service(contact::submit_contact)
        .service(contact::list_contact_messages)
        .service(contact::contact_stats)
        .service(contact::update_contact_status)
        .service(contact::get_contact_message)
        .service(contact::delete_contact_message)
        .service(images::upload_image)
        .service(images::list_images)
        .service(images::get_image_by_cloudinary_id)
        .service(images::get_image)
        .service(images::delete_image)
}
