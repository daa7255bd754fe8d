//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings for the HTTP server and its collaborators.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Path segment under `/api` that all routes are mounted on.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
    /// Per-request timeout for outbound HTTP calls.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,
    pub email: EmailConfig,
    pub media: MediaConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmailConfig {
    /// Brevo API key. Without one, outgoing mail is only logged.
    #[serde(default)]
    pub brevo_api_key: Option<String>,
    #[serde(default = "default_brevo_url")]
    pub api_url: String,
    pub from_email: String,
    pub from_name: String,
    pub admin_email: String,
    pub support_email: String,
    pub support_phone: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_cloudinary_url")]
    pub base_url: String,
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_http_timeout() -> u64 {
    15
}

fn default_brevo_url() -> String {
    "https://api.brevo.com/v3/smtp/email".to_string()
}

fn default_cloudinary_url() -> String {
    "https://api.cloudinary.com".to_string()
}
