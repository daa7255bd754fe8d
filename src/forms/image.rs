use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};

use crate::forms::FormError;

pub const DEFAULT_FOLDER: &str = "biomed";
pub const PROFILE_FOLDER: &str = "biomed/profiles";

const ALLOWED_MIMES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Multipart body of `POST /images/upload`.
#[derive(MultipartForm)]
pub struct UploadImageForm {
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
    pub folder: Option<Text<String>>,
}

/// Multipart body of `POST /users/{id}/profile-image`.
#[derive(MultipartForm)]
pub struct ProfileImageForm {
    #[multipart(limit = "5MB")]
    pub image: Option<TempFile>,
}

/// An accepted image file read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub folder: String,
}

/// Both the declared MIME type and the file extension must name an image.
pub fn is_supported_image(content_type: Option<&str>, file_name: Option<&str>) -> bool {
    let mime_ok = content_type.is_some_and(|mime| ALLOWED_MIMES.contains(&mime));
    let extension_ok = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    mime_ok && extension_ok
}

fn read_image(file: Option<TempFile>, folder: String) -> Result<ImageUpload, FormError> {
    let file = file.ok_or(FormError::MissingFile)?;

    let content_type = file.content_type.as_ref().map(|mime| mime.essence_str());
    if !is_supported_image(content_type, file.file_name.as_deref()) {
        return Err(FormError::UnsupportedImage);
    }

    let bytes = std::fs::read(file.file.path())?;
    Ok(ImageUpload {
        bytes,
        file_name: file.file_name.unwrap_or_else(|| "upload".to_string()),
        folder,
    })
}

impl TryFrom<UploadImageForm> for ImageUpload {
    type Error = FormError;

    fn try_from(form: UploadImageForm) -> Result<Self, Self::Error> {
        let folder = form
            .folder
            .map(Text::into_inner)
            .map(|f| f.trim().trim_matches('/').to_string())
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_FOLDER.to_string());
        read_image(form.image, folder)
    }
}

impl TryFrom<ProfileImageForm> for ImageUpload {
    type Error = FormError;

    fn try_from(form: ProfileImageForm) -> Result<Self, Self::Error> {
        read_image(form.image, PROFILE_FOLDER.to_string())
    }
}
