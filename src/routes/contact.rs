use actix_web::{Responder, delete, get, post, put, web};

use crate::clients::email::Notifier;
use crate::forms::contact::{ContactForm, ContactStatusForm};
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, ok, paged};
use crate::services::contact as service;

#[post("/contact/submit")]
pub async fn submit_contact(
    repo: web::Data<DieselRepository>,
    notifier: web::Data<Notifier>,
    web::Json(form): web::Json<ContactForm>,
) -> impl Responder {
    match service::submit_contact(repo.get_ref(), notifier.get_ref(), form).await {
        Ok(message) => created(
            "Thank you for contacting us! We will get back to you soon.",
            message,
        ),
        Err(e) => error_response(e, "Failed to submit contact form"),
    }
}

#[get("/contact")]
pub async fn list_contact_messages(
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_contact_messages(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Messages retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve messages"),
    }
}

#[get("/contact/stats/summary")]
pub async fn contact_stats(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::contact_stats(repo.get_ref()) {
        Ok(stats) => ok("Statistics retrieved successfully", stats),
        Err(e) => error_response(e, "Failed to retrieve statistics"),
    }
}

#[put("/contact/{id}/status")]
pub async fn update_contact_status(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ContactStatusForm>,
) -> impl Responder {
    match service::update_contact_status(repo.get_ref(), id.into_inner(), form) {
        Ok(message) => ok("Message status updated successfully", message),
        Err(e) => error_response(e, "Failed to update message status"),
    }
}

#[get("/contact/{id}")]
pub async fn get_contact_message(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_contact_message(repo.get_ref(), id.into_inner()) {
        Ok(message) => ok("Message retrieved successfully", message),
        Err(e) => error_response(e, "Failed to retrieve message"),
    }
}

#[delete("/contact/{id}")]
pub async fn delete_contact_message(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::delete_contact_message(repo.get_ref(), id.into_inner()) {
        Ok(message) => ok("Message deleted successfully", message),
        Err(e) => error_response(e, "Failed to delete message"),
    }
}
