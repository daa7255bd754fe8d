use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::ImageId;

/// Stored image metadata. `url` is always the HTTPS delivery URL.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Image {
    pub id: String,
    pub cloudinary_id: String,
    pub url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub size: Option<i64>,
    pub format: Option<String>,
    pub folder: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewImage {
    pub id: ImageId,
    pub cloudinary_id: String,
    pub url: String,
    pub secure_url: String,
    pub public_id: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub format: Option<String>,
    pub size: Option<i64>,
    pub folder: String,
}
