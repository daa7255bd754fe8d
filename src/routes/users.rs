use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, patch, post, put, web};
use serde_json::{Map, Value};

use crate::clients::media::MediaHost;
use crate::forms::image::ProfileImageForm;
use crate::forms::user::{CreateUserForm, UserStatusForm};
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, ok, paged, read_upload};
use crate::services::users as service;

#[post("/users")]
pub async fn create_user(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateUserForm>,
) -> impl Responder {
    match service::create_user(repo.get_ref(), form) {
        Ok(user) => created("User created successfully", user),
        Err(e) => error_response(e, "Failed to create user"),
    }
}

#[get("/users")]
pub async fn list_users(params: ListParams, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_users(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Users retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve users"),
    }
}

#[get("/users/instructors")]
pub async fn list_instructors(
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_instructors(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Instructors retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve instructors"),
    }
}

#[get("/users/email/{email}")]
pub async fn get_user_by_email(
    email: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_user_by_email(repo.get_ref(), &email) {
        Ok(user) => ok("User retrieved successfully", user),
        Err(e) => error_response(e, "Failed to retrieve user"),
    }
}

#[post("/users/{id}/profile-image")]
pub async fn upload_profile_image(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    media: web::Data<dyn MediaHost>,
    MultipartForm(form): MultipartForm<ProfileImageForm>,
) -> impl Responder {
    let upload = match read_upload(form).await {
        Ok(upload) => upload,
        Err(e) => return error_response(e, "Failed to upload profile image"),
    };

    match service::upload_profile_image(repo.get_ref(), media.get_ref(), id.into_inner(), upload)
        .await
    {
        Ok(image) => created("Profile image uploaded successfully", image),
        Err(e) => error_response(e, "Failed to upload profile image"),
    }
}

#[patch("/users/{id}/status")]
pub async fn update_user_status(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UserStatusForm>,
) -> impl Responder {
    match service::update_user_status(repo.get_ref(), id.into_inner(), form) {
        Ok(user) => ok("User status updated successfully", user),
        Err(e) => error_response(e, "Failed to update user status"),
    }
}

#[get("/users/{id}")]
pub async fn get_user(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::get_user(repo.get_ref(), id.into_inner()) {
        Ok(user) => ok("User retrieved successfully", user),
        Err(e) => error_response(e, "Failed to retrieve user"),
    }
}

#[put("/users/{id}")]
pub async fn update_user(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Map<String, Value>>,
) -> impl Responder {
    match service::update_user(repo.get_ref(), id.into_inner(), &payload) {
        Ok(user) => ok("User updated successfully", user),
        Err(e) => error_response(e, "Failed to update user"),
    }
}

#[delete("/users/{id}")]
pub async fn delete_user(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::delete_user(repo.get_ref(), id.into_inner()) {
        Ok(deleted) => ok("User deleted successfully", deleted),
        Err(e) => error_response(e, "Failed to delete user"),
    }
}
