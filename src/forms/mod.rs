//! Request payloads accepted by the API and their conversion into domain
//! submissions.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::domain::types::NonEmptyString;

pub mod blog;
pub mod contact;
pub mod course;
pub mod image;
pub mod newsletter;
pub mod user;

#[derive(Debug, Error)]
/// Errors that can occur when processing request payloads.
pub enum FormError {
    /// One or more mandatory fields were absent or blank.
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("{0}")]
    Invalid(&'static str),

    #[error("No image file provided")]
    MissingFile,

    #[error("Only image files are allowed (JPG, PNG, GIF, WEBP)")]
    UnsupportedImage,

    #[error("failed to read uploaded file: {0}")]
    Io(#[from] std::io::Error),
}

/// Returns the trimmed value when it is present and not blank.
pub(crate) fn present(value: Option<String>) -> Option<NonEmptyString> {
    value.and_then(|v| NonEmptyString::new(v).ok())
}

/// Drops blank optional strings so that the column default applies.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    present(value).map(NonEmptyString::into_inner)
}

/// Accepts `true`/`false`, `1`/`0` and their string spellings.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Ok(Some(true)),
            Some(0) => Ok(Some(false)),
            _ => Err(serde::de::Error::custom("expected a boolean")),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            "" => Ok(None),
            _ => Err(serde::de::Error::custom("expected a boolean")),
        },
        Some(_) => Err(serde::de::Error::custom("expected a boolean")),
    }
}

/// Accepts integers given either as JSON numbers or numeric strings.
pub(crate) fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected an integer")),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("expected an integer")),
        Some(_) => Err(serde::de::Error::custom("expected an integer")),
    }
}

/// Accepts decimals given either as JSON numbers or numeric strings.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom("expected a number")),
        Some(_) => Err(serde::de::Error::custom("expected a number")),
    }
}
