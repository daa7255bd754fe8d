//! Outbound HTTP collaborators: transactional email and media hosting.

use thiserror::Error;

pub mod email;
pub mod media;

/// Failure talking to a third-party service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} responded with status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {service}: {reason}")]
    InvalidResponse {
        service: &'static str,
        reason: String,
    },
}

/// Turns a non-success response into [`UpstreamError::Status`].
async fn check_status(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Status {
        service,
        status: status.as_u16(),
        body,
    })
}
