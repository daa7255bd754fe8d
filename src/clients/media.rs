//! Image hosting on Cloudinary.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::clients::{UpstreamError, check_status};
use crate::models::config::MediaConfig;

const SERVICE: &str = "Cloudinary";

/// Asset description returned by the media host after an upload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadedMedia {
    pub public_id: String,
    pub url: String,
    pub secure_url: String,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
    #[serde(default)]
    pub bytes: Option<i64>,
    #[serde(default)]
    pub format: Option<String>,
}

#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
#[async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<UploadedMedia, UpstreamError>;

    async fn destroy(&self, public_id: &str) -> Result<(), UpstreamError>;
}

/// Signs request parameters the way Cloudinary expects: parameters sorted by
/// name, joined as `k=v&k=v`, suffixed with the API secret, SHA-256, hex.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryClient {
    http: reqwest::Client,
    base_url: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryClient {
    pub fn new(config: &MediaConfig, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
        })
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/v1_1/{}/image/{action}", self.base_url, self.cloud_name)
    }

    /// Adds credentials and the signature over `params` to a form.
    fn signed_form(&self, params: &[(&str, &str)]) -> Form {
        let signature = sign(params, &self.api_secret);
        params
            .iter()
            .fold(Form::new(), |form, (k, v)| form.text(k.to_string(), v.to_string()))
            .text("api_key", self.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256")
    }
}

#[async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        folder: &str,
    ) -> Result<UploadedMedia, UpstreamError> {
        let timestamp = Utc::now().timestamp().to_string();
        let form = self
            .signed_form(&[("folder", folder), ("timestamp", &timestamp)])
            .part("file", Part::bytes(bytes).file_name(filename.to_string()));

        let response = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let uploaded = check_status(SERVICE, response)
            .await?
            .json::<UploadedMedia>()
            .await?;

        log::info!("Uploaded {} to {}", uploaded.public_id, SERVICE);
        Ok(uploaded)
    }

    async fn destroy(&self, public_id: &str) -> Result<(), UpstreamError> {
        let timestamp = Utc::now().timestamp().to_string();
        let form = self.signed_form(&[("public_id", public_id), ("timestamp", &timestamp)]);

        let response = self
            .http
            .post(self.endpoint("destroy"))
            .multipart(form)
            .send()
            .await?;
        let outcome = check_status(SERVICE, response)
            .await?
            .json::<DestroyResponse>()
            .await?;

        match outcome.result.as_str() {
            "ok" => Ok(()),
            "not found" => {
                log::warn!("{public_id} was already absent from {SERVICE}");
                Ok(())
            }
            other => Err(UpstreamError::InvalidResponse {
                service: SERVICE,
                reason: format!("destroy returned '{other}'"),
            }),
        }
    }
}
