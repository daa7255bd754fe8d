use serde::Deserialize;
use sha2::{Digest, Sha256};
use validator::Validate;

use crate::domain::types::EmailAddress;
use crate::domain::user::{NewUser, UserStatus};
use crate::forms::{FormError, lenient_bool, optional, present};

pub const USER_REQUIRED: &str =
    "Missing required fields: first_name, last_name, email, phone, password";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const INVALID_STATUS: &str = "Invalid status. Must be ACTIVE or INACTIVE";

/// Hex-encoded SHA-256 digest stored in `users.password_hash`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// JSON body of `POST /users`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUserForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 6))]
    pub password: Option<String>,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
    pub biography: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub role: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_instructor: Option<bool>,
    pub status: Option<String>,
}

impl TryFrom<CreateUserForm> for NewUser {
    type Error = FormError;

    fn try_from(form: CreateUserForm) -> Result<Self, Self::Error> {
        let password = form
            .password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or(FormError::MissingFields(USER_REQUIRED))?;

        let (Some(first_name), Some(last_name), Some(email), Some(phone)) = (
            present(form.first_name.clone()),
            present(form.last_name.clone()),
            present(form.email.clone()),
            present(form.phone.clone()),
        ) else {
            return Err(FormError::MissingFields(USER_REQUIRED));
        };

        if form.validate().is_err() {
            return Err(FormError::Invalid(PASSWORD_TOO_SHORT));
        }

        let email = EmailAddress::new(email.into_inner())
            .map_err(|_| FormError::Invalid(INVALID_EMAIL))?;

        Ok(NewUser {
            first_name,
            last_name,
            email,
            phone,
            password_hash: hash_password(&password),
            title: optional(form.title),
            address: optional(form.address),
            profile_image_url: optional(form.profile_image_url),
            biography: optional(form.biography),
            linkedin_url: optional(form.linkedin_url),
            github_url: optional(form.github_url),
            role: optional(form.role),
            is_instructor: form.is_instructor,
            status: optional(form.status),
        })
    }
}

/// JSON body of `PATCH /users/{id}/status`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserStatusForm {
    pub status: Option<String>,
}

impl TryFrom<UserStatusForm> for UserStatus {
    type Error = FormError;

    fn try_from(form: UserStatusForm) -> Result<Self, Self::Error> {
        form.status
            .as_deref()
            .and_then(UserStatus::parse)
            .ok_or(FormError::Invalid(INVALID_STATUS))
    }
}
