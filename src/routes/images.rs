use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, post, web};

use crate::clients::media::MediaHost;
use crate::forms::image::UploadImageForm;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, created, error_response, list_query, ok, paged, read_upload};
use crate::services::images::{self as service, UploadOutcome};

#[post("/images/upload")]
pub async fn upload_image(
    repo: web::Data<DieselRepository>,
    media: web::Data<dyn MediaHost>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let upload = match read_upload(form).await {
        Ok(upload) => upload,
        Err(e) => return error_response(e, "Failed to process image upload"),
    };

    match service::upload_image(repo.get_ref(), media.get_ref(), upload).await {
        Ok(UploadOutcome::Stored(image)) => created("Image uploaded successfully", image),
        Ok(UploadOutcome::Unrecorded(hosted)) => {
            created("Image uploaded successfully (metadata not saved)", hosted)
        }
        Err(e) => error_response(e, "Failed to process image upload"),
    }
}

#[get("/images")]
pub async fn list_images(params: ListParams, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_images(repo.get_ref(), &list_query(params)) {
        Ok(page) => paged("Images retrieved successfully", page),
        Err(e) => error_response(e, "Failed to retrieve images"),
    }
}

#[get("/images/cloudinary/{cloudinary_id:.*}")]
pub async fn get_image_by_cloudinary_id(
    cloudinary_id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::get_image_by_cloudinary_id(repo.get_ref(), &cloudinary_id) {
        Ok(image) => ok("Image retrieved successfully", image),
        Err(e) => error_response(e, "Failed to retrieve image"),
    }
}

#[get("/images/{id}")]
pub async fn get_image(id: web::Path<String>, repo: web::Data<DieselRepository>) -> impl Responder {
    match service::get_image(repo.get_ref(), &id) {
        Ok(image) => ok("Image retrieved successfully", image),
        Err(e) => error_response(e, "Failed to retrieve image"),
    }
}

#[delete("/images/{id}")]
pub async fn delete_image(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    media: web::Data<dyn MediaHost>,
) -> impl Responder {
    match service::delete_image(repo.get_ref(), media.get_ref(), &id).await {
        Ok(deleted) => ok("Image deleted successfully", deleted),
        Err(e) => error_response(e, "Failed to delete image"),
    }
}
