//! Image library backed by the media host.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clients::media::{MediaHost, UploadedMedia};
use crate::domain::image::{Image, NewImage};
use crate::domain::types::ImageId;
use crate::forms::image::ImageUpload;
use crate::pagination::Page;
use crate::repository::{ImageReader, ImageWriter, ListQuery};
use crate::services::{RepositoryResultExt, ServiceError, ServiceResult};

pub const IMAGE_NOT_FOUND: &str = "Image not found";
pub const IMAGE_UPLOAD_FAILED: &str = "Failed to upload image to Cloudinary";
pub const IMAGE_DELETE_FAILED: &str = "Failed to delete image from Cloudinary";

/// Hosted asset description returned to clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HostedImage {
    pub cloudinary_id: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size: Option<i64>,
    pub format: Option<String>,
}

impl From<UploadedMedia> for HostedImage {
    fn from(media: UploadedMedia) -> Self {
        Self {
            cloudinary_id: media.public_id,
            url: media.secure_url,
            width: media.width,
            height: media.height,
            size: media.bytes,
            format: media.format,
        }
    }
}

/// Result of an upload. The asset may be hosted even when recording its
/// metadata failed.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Stored(Image),
    Unrecorded(HostedImage),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeletedImage {
    pub id: String,
    pub deleted_at: DateTime<Utc>,
}

fn not_found() -> ServiceError {
    ServiceError::NotFound(IMAGE_NOT_FOUND.to_string())
}

fn parse_image_id(raw: &str) -> ServiceResult<ImageId> {
    raw.parse().map_err(|_| not_found())
}

/// Uploads the file and records its metadata under a fresh identifier.
pub async fn upload_image<R, M>(
    repo: &R,
    media: &M,
    upload: ImageUpload,
) -> ServiceResult<UploadOutcome>
where
    R: ImageWriter + ?Sized,
    M: MediaHost + ?Sized,
{
    let uploaded = media
        .upload(upload.bytes, &upload.file_name, &upload.folder)
        .await
        .map_err(|err| {
            log::error!("Image upload to folder {} failed: {err}", upload.folder);
            ServiceError::Upstream(IMAGE_UPLOAD_FAILED.to_string())
        })?;

    let new_image = NewImage {
        id: ImageId::new(),
        cloudinary_id: uploaded.public_id.clone(),
        url: uploaded.url.clone(),
        secure_url: uploaded.secure_url.clone(),
        public_id: uploaded.public_id.clone(),
        width: uploaded.width,
        height: uploaded.height,
        format: uploaded.format.clone(),
        size: uploaded.bytes,
        folder: upload.folder,
    };

    match repo.create_image(&new_image) {
        Ok(image) => Ok(UploadOutcome::Stored(image)),
        Err(err) => {
            log::error!(
                "Uploaded {} but failed to record it: {err}",
                uploaded.public_id
            );
            Ok(UploadOutcome::Unrecorded(uploaded.into()))
        }
    }
}

pub fn list_images<R>(repo: &R, query: &ListQuery) -> ServiceResult<Page<Image>>
where
    R: ImageReader + ?Sized,
{
    repo.list_images(query).map_err(ServiceError::from)
}

/// Looks an image up by its UUID; malformed ids cannot match anything.
pub fn get_image<R>(repo: &R, id: &str) -> ServiceResult<Image>
where
    R: ImageReader + ?Sized,
{
    let id = parse_image_id(id)?;
    repo.get_image_by_id(id)?.ok_or_else(not_found)
}

pub fn get_image_by_cloudinary_id<R>(repo: &R, cloudinary_id: &str) -> ServiceResult<Image>
where
    R: ImageReader + ?Sized,
{
    repo.get_image_by_cloudinary_id(cloudinary_id)?
        .ok_or_else(not_found)
}

/// Removes the asset from the media host first, then the metadata row.
pub async fn delete_image<R, M>(repo: &R, media: &M, id: &str) -> ServiceResult<DeletedImage>
where
    R: ImageReader + ImageWriter + ?Sized,
    M: MediaHost + ?Sized,
{
    let image_id = parse_image_id(id)?;
    let image = repo.get_image_by_id(image_id)?.ok_or_else(not_found)?;

    media.destroy(&image.cloudinary_id).await.map_err(|err| {
        log::error!("Failed to destroy {}: {err}", image.cloudinary_id);
        ServiceError::Upstream(IMAGE_DELETE_FAILED.to_string())
    })?;

    repo.delete_image(image_id).or_not_found(IMAGE_NOT_FOUND)?;
    log::info!("Deleted image {image_id}");

    Ok(DeletedImage {
        id: image.id,
        deleted_at: Utc::now(),
    })
}
