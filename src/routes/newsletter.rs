use actix_web::{Responder, get, post, web};

use crate::clients::email::Notifier;
use crate::forms::newsletter::NewsletterForm;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, ok, paged};
use crate::services::newsletter as service;

#[get("/newsletter")]
pub async fn list_subscribers(
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_subscribers(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Subscribers retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve subscribers"),
    }
}

#[get("/newsletter/stats/summary")]
pub async fn subscriber_stats(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::subscriber_stats(repo.get_ref()) {
        Ok(stats) => ok("Statistics retrieved successfully", stats),
        Err(e) => error_response(e, "Failed to retrieve statistics"),
    }
}

#[post("/newsletter/subscribe")]
pub async fn subscribe(
    repo: web::Data<DieselRepository>,
    notifier: web::Data<Notifier>,
    web::Json(form): web::Json<NewsletterForm>,
) -> impl Responder {
    match service::subscribe(repo.get_ref(), notifier.get_ref(), form).await {
        Ok(subscriber) => created("Successfully subscribed to newsletter!", subscriber),
        Err(e) => error_response(e, "Failed to subscribe to newsletter"),
    }
}

#[post("/newsletter/confirm")]
pub async fn confirm(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<NewsletterForm>,
) -> impl Responder {
    match service::confirm(repo.get_ref(), form) {
        Ok(subscriber) => ok("You are already subscribed to our newsletter!", subscriber),
        Err(e) => error_response(e, "Failed to confirm subscription"),
    }
}

#[post("/newsletter/unsubscribe")]
pub async fn unsubscribe(
    repo: web::Data<DieselRepository>,
    notifier: web::Data<Notifier>,
    web::Json(form): web::Json<NewsletterForm>,
) -> impl Responder {
    match service::unsubscribe(repo.get_ref(), notifier.get_ref(), form).await {
        Ok(subscriber) => ok("Successfully unsubscribed from newsletter", subscriber),
        Err(e) => error_response(e, "Failed to unsubscribe"),
    }
}

#[get("/newsletter/{email}")]
pub async fn get_subscriber(
    email: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_subscriber(repo.get_ref(), &email) {
        Ok(subscriber) => ok("Subscriber retrieved successfully", subscriber),
        Err(e) => error_response(e, "Failed to retrieve subscriber"),
    }
}
