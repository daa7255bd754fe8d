use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{EmailAddress, NonEmptyString};

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ContactMessage {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub interest_topic: Option<String>,
    pub message: String,
    pub agreed_to_terms: bool,
    pub status: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewContactMessage {
    pub full_name: NonEmptyString,
    pub email: EmailAddress,
    pub country_code: Option<String>,
    pub phone_number: Option<String>,
    pub interest_topic: Option<String>,
    pub message: NonEmptyString,
    pub agreed_to_terms: bool,
}

/// Message counts per workflow status.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct ContactStats {
    pub total: usize,
    pub new: usize,
    pub responded: usize,
    pub resolved: usize,
}
