use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde_json::{Map, Value};

use crate::forms::blog::CreateBlogForm;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, listed, ok, paged};
use crate::services::blogs as service;

#[get("/blogs")]
pub async fn list_all_blogs(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_all_blogs(repo.get_ref()) {
        Ok(blogs) => listed("Blogs retrieved successfully", blogs),
        Err(e) => error_response(e, "Failed to retrieve blogs"),
    }
}

#[get("/blogs/filtered")]
pub async fn list_filtered_blogs(
    params: ListParams,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_blogs(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Blogs retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve blogs"),
    }
}

#[get("/blogs/slug/{slug}")]
pub async fn get_blog_by_slug(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_blog_by_slug(repo.get_ref(), &slug) {
        Ok(blog) => ok("Blog retrieved successfully", blog),
        Err(e) => error_response(e, "Failed to retrieve blog"),
    }
}

fn create(repo: &DieselRepository, form: CreateBlogForm) -> HttpResponse {
    match service::create_blog(repo, form) {
        Ok(blog) => created("Blog created successfully", blog),
        Err(e) => error_response(e, "Failed to create blog"),
    }
}

#[post("/blogs/create")]
pub async fn create_blog(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateBlogForm>,
) -> impl Responder {
    create(repo.get_ref(), form)
}

#[post("/blogs")]
pub async fn create_blog_alias(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateBlogForm>,
) -> impl Responder {
    create(repo.get_ref(), form)
}

#[get("/blogs/{id}")]
pub async fn get_blog(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::get_blog(repo.get_ref(), id.into_inner()) {
        Ok(blog) => ok("Blog retrieved successfully", blog),
        Err(e) => error_response(e, "Failed to retrieve blog"),
    }
}

#[put("/blogs/{id}")]
pub async fn update_blog(
    id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(payload): web::Json<Map<String, Value>>,
) -> impl Responder {
    match service::update_blog(repo.get_ref(), id.into_inner(), &payload) {
        Ok(blog) => ok("Blog updated successfully", blog),
        Err(e) => error_response(e, "Failed to update blog"),
    }
}

#[delete("/blogs/{id}")]
pub async fn delete_blog(id: web::Path<i32>, repo: web::Data<DieselRepository>) -> impl Responder {
    let id = id.into_inner();
    match service::delete_blog(repo.get_ref(), id) {
        Ok(()) => ok("Blog deleted successfully", serde_json::json!({ "id": id })),
        Err(e) => error_response(e, "Failed to delete blog"),
    }
}
