use actix_web::{Responder, delete, get, post, put, web};
use serde_json::{Map, Value};

use crate::forms::course::CreateCourseForm;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, listed, ok, paged};
use crate::services::courses as service;

#[get("/courses")]
pub async fn list_all_courses(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_all_courses(repo.get_ref()) {
        Ok(courses) => listed("Courses retrieved successfully", courses),
        Err(e) => error_response(e, "Failed to retrieve courses"),
    }
}

#[get("/courses/filtered")]
pub async fn list_filtered_courses(
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_courses(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Courses retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve courses"),
    }
}

#[get("/courses/category/{category_id}")]
pub async fn list_courses_by_category(
    category_id: web::Path<i32>,
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = category_id.into_inner();
    match service::list_courses_in_category(repo.get_ref(), category_id, list_query(params)) {
        Ok(page) => paged(
            &format!("Courses retrieved successfully for category {category_id}"),
            page,
        ),
        Err(e) => error_response(e, "Failed to retrieve courses"),
    }
}

#[post("/courses")]
pub async fn create_course(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCourseForm>,
) -> impl Responder {
    match service::create_course(repo.get_ref(), form) {
        Ok(course) => created("Course created successfully", course),
        Err(e) => error_response(e, "Failed to create course"),
    }
}

#[get("/courses/{id}")]
pub async fn get_course(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::get_course(repo.get_ref(), id.into_inner()) {
        Ok(course) => ok("Course retrieved successfully", course),
        Err(e) => error_response(e, "Failed to retrieve course"),
    }
}

#[put("/courses/{id}")]
pub async fn update_course(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Map<String, Value>>,
) -> impl Responder {
    match service::update_course(repo.get_ref(), id.into_inner(), &payload) {
        Ok(course) => ok("Course updated successfully", course),
        Err(e) => error_response(e, "Failed to update course"),
    }
}

#[delete("/courses/{id}")]
pub async fn delete_course(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = id.into_inner();
    match service::delete_course(repo.get_ref(), id) {
        Ok(()) => ok("Course deleted successfully", serde_json::json!({ "id": id })),
        Err(e) => error_response(e, "Failed to delete course"),
    }
}
