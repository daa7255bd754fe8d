use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::image::{Image as DomainImage, NewImage as DomainNewImage};

pub const COLUMNS: &str = "id, cloudinary_id, url, secure_url, public_id, width, height, \
     format, size, folder, uploaded_at";

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = crate::schema::images)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Image {
    pub id: String,
    pub cloudinary_id: String,
    pub url: String,
    pub secure_url: String,
    pub public_id: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub format: Option<String>,
    pub size: Option<i64>,
    pub folder: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage<'a> {
    pub id: String,
    pub cloudinary_id: &'a str,
    pub url: &'a str,
    pub secure_url: &'a str,
    pub public_id: &'a str,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub format: Option<&'a str>,
    pub size: Option<i64>,
    pub folder: &'a str,
}

impl From<Image> for DomainImage {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            cloudinary_id: image.cloudinary_id,
            url: image.secure_url,
            width: image.width,
            height: image.height,
            size: image.size,
            format: image.format,
            folder: image.folder,
            uploaded_at: image.uploaded_at,
        }
    }
}

impl<'a> From<&'a DomainNewImage> for NewImage<'a> {
    fn from(image: &'a DomainNewImage) -> Self {
        Self {
            id: image.id.to_string(),
            cloudinary_id: &image.cloudinary_id,
            url: &image.url,
            secure_url: &image.secure_url,
            public_id: &image.public_id,
            width: image.width,
            height: image.height,
            format: image.format.as_deref(),
            size: image.size,
            folder: &image.folder,
        }
    }
}
