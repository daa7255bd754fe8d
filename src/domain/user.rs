use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{EmailAddress, NonEmptyString};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_INSTRUCTOR: &str = "INSTRUCTOR";
pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_INACTIVE: &str = "INACTIVE";

/// User account as exposed to clients. The password hash never leaves the
/// repository.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
    pub biography: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub role: String,
    pub is_instructor: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_instructor(&self) -> bool {
        self.role == ROLE_INSTRUCTOR || self.is_instructor
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

/// Account status accepted by the status endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            STATUS_ACTIVE => Some(Self::Active),
            STATUS_INACTIVE => Some(Self::Inactive),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Inactive => STATUS_INACTIVE,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewUser {
    pub first_name: NonEmptyString,
    pub last_name: NonEmptyString,
    pub email: EmailAddress,
    pub phone: NonEmptyString,
    /// Hex-encoded SHA-256 digest of the submitted password.
    pub password_hash: String,
    pub title: Option<String>,
    pub address: Option<String>,
    pub profile_image_url: Option<String>,
    pub biography: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub role: Option<String>,
    pub is_instructor: Option<bool>,
    pub status: Option<String>,
}
