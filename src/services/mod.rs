//! Use-case layer between the HTTP routes and the repository.
//!
//! Services are generic over the repository traits so that they can be
//! exercised against `MockRepository` without a database.

use thiserror::Error;

use crate::clients::UpstreamError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod blogs;
pub mod contact;
pub mod courses;
pub mod health;
pub mod images;
pub mod newsletter;
pub mod users;

/// Failures a service reports to the HTTP layer. The carried message is safe
/// to show to API clients, except for `Internal` which is only logged.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound("Resource not found".to_string()),
            RepositoryError::ValidationError(message)
            | RepositoryError::ConstraintViolation(message) => ServiceError::Validation(message),
            RepositoryError::Duplicate(message) => ServiceError::Conflict(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Io(_) => ServiceError::Internal(err.to_string()),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

/// Replaces the generic repository messages with resource-specific ones.
pub(crate) trait RepositoryResultExt<T> {
    /// Maps `NotFound` to a `ServiceError::NotFound` carrying `message`.
    fn or_not_found(self, message: &str) -> ServiceResult<T>;

    /// Maps `Duplicate` to a `ServiceError::Conflict` carrying `message`.
    fn or_conflict(self, message: &str) -> ServiceResult<T>;

    /// Applies both replacements.
    fn or_resource_errors(self, not_found: &str, conflict: &str) -> ServiceResult<T>;
}

impl<T> RepositoryResultExt<T> for Result<T, RepositoryError> {
    fn or_not_found(self, message: &str) -> ServiceResult<T> {
        self.map_err(|err| match err {
            RepositoryError::NotFound => ServiceError::NotFound(message.to_string()),
            other => other.into(),
        })
    }

    fn or_conflict(self, message: &str) -> ServiceResult<T> {
        self.map_err(|err| match err {
            RepositoryError::Duplicate(detail) => {
                log::info!("Rejected duplicate write: {detail}");
                ServiceError::Conflict(message.to_string())
            }
            other => other.into(),
        })
    }

    fn or_resource_errors(self, not_found: &str, conflict: &str) -> ServiceResult<T> {
        match self {
            Err(RepositoryError::NotFound) => Err(ServiceError::NotFound(not_found.to_string())),
            other => other.or_conflict(conflict),
        }
    }
}

/// Parses a path identifier into a typed id, reporting `message` as not found
/// when the value can never exist.
pub(crate) fn parse_id<I>(raw: i32, message: &str) -> ServiceResult<I>
where
    I: TryFrom<i32, Error = TypeConstraintError>,
{
    I::try_from(raw).map_err(|_| ServiceError::NotFound(message.to_string()))
}
