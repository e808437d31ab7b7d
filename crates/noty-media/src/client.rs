//! Image CDN client.
//!
//! Uploads go to the provider's REST endpoint as an
//! `application/x-www-form-urlencoded` body carrying the file as a base64
//! data URI together with the API key, timestamp, folder, and signature.
//! One attempt per call; no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use noty_core::{defaults, Error, ImageStore, Result};

use crate::config::MediaConfig;
use crate::signature::sign;

/// Default provider API base.
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Client for the remote image store.
pub struct MediaClient {
    client: Client,
    config: MediaConfig,
    api_base: String,
}

impl MediaClient {
    /// Create a client from validated configuration.
    pub fn new(config: MediaConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        info!(
            cloud_name = %config.cloud_name,
            folder = %config.folder,
            "Initializing media client"
        );

        Ok(Self {
            client,
            config,
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Override the provider API base (tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{action}",
            self.api_base, self.config.cloud_name
        )
    }

    /// Encode the file as a data URI, falling back to a generic image type
    /// when the declared type is empty.
    fn data_uri(bytes: &[u8], content_type: &str) -> String {
        use base64::Engine;
        let content_type = if content_type.is_empty() {
            defaults::DEFAULT_IMAGE_CONTENT_TYPE
        } else {
            content_type
        };
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        format!("data:{content_type};base64,{encoded}")
    }

    /// Reduce a non-2xx provider body to one human-readable message:
    /// structured extraction first, raw text as the fallback.
    fn extract_error_message(status: u16, body: &str) -> String {
        #[derive(Deserialize)]
        struct ProviderError {
            error: ProviderErrorInner,
        }
        #[derive(Deserialize)]
        struct ProviderErrorInner {
            message: String,
        }

        if let Ok(parsed) = serde_json::from_str::<ProviderError>(body) {
            return parsed.error.message;
        }
        if body.trim().is_empty() {
            format!("Image upload failed with status {status}")
        } else {
            body.trim().to_string()
        }
    }
}

/// Successful upload metadata. Only the fields the application reads.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    #[allow(dead_code)]
    public_id: Option<String>,
}

#[async_trait]
impl ImageStore for MediaClient {
    async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[
                ("folder", self.config.folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
        );

        debug!(
            size = bytes.len(),
            content_type, "Uploading image to provider"
        );

        let file = Self::data_uri(bytes, content_type);
        let response = self
            .client
            .post(self.endpoint("upload"))
            .form(&[
                ("file", file.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
                ("folder", self.config.folder.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Image upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::extract_error_message(status.as_u16(), &body);
            error!(status = %status, %message, "Image provider rejected upload");
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let result: UploadResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(format!("Invalid provider response: {e}")))?;

        match result.secure_url {
            Some(url) => {
                info!(%url, "Image uploaded");
                Ok(url)
            }
            None => Err(Error::Remote {
                status: status.as_u16(),
                message: "No URL returned from image provider".to_string(),
            }),
        }
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Request(format!("Image delete request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message: Self::extract_error_message(status.as_u16(), &body),
            });
        }

        debug!(public_id, "Image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> MediaClient {
        MediaClient::new(MediaConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "noty-app".into(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_layout() {
        let c = client();
        assert_eq!(
            c.endpoint("upload"),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
        assert_eq!(
            c.endpoint("destroy"),
            "https://api.cloudinary.com/v1_1/demo/image/destroy"
        );
    }

    #[test]
    fn test_data_uri_uses_declared_type() {
        let uri = MediaClient::data_uri(b"abc", "image/png");
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_data_uri_falls_back_when_type_empty() {
        let uri = MediaClient::data_uri(b"abc", "");
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_error_extraction_prefers_structured_message() {
        let msg = MediaClient::extract_error_message(
            401,
            r#"{"error":{"message":"Invalid signature"}}"#,
        );
        assert_eq!(msg, "Invalid signature");
    }

    #[test]
    fn test_error_extraction_falls_back_to_raw_text() {
        let msg = MediaClient::extract_error_message(502, "Bad Gateway");
        assert_eq!(msg, "Bad Gateway");
    }

    #[test]
    fn test_error_extraction_handles_empty_body() {
        let msg = MediaClient::extract_error_message(500, "   ");
        assert_eq!(msg, "Image upload failed with status 500");
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let result = MediaClient::new(MediaConfig {
            cloud_name: String::new(),
            api_key: "key".into(),
            api_secret: "secret".into(),
            folder: "noty-app".into(),
            timeout_secs: 5,
        });
        assert!(result.is_err());
    }
}
