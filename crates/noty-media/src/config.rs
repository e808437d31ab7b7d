//! Media provider configuration.
//!
//! Credentials are read from the environment exactly once, at startup, and
//! injected into [`crate::MediaClient`]. Nothing in this crate re-reads the
//! environment per call.

use noty_core::{defaults, Error, Result};

/// Configuration for the image CDN.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Provider cloud name (first path segment of the upload URL).
    pub cloud_name: String,
    /// Public API key, sent with every upload.
    pub api_key: String,
    /// Signing secret. Never sent over the wire.
    pub api_secret: String,
    /// Target folder. One fixed namespace for the whole application.
    pub folder: String,
    /// Upload timeout in seconds.
    pub timeout_secs: u64,
}

impl MediaConfig {
    /// Read configuration from the environment.
    ///
    /// Required: `NOTY_MEDIA_CLOUD_NAME`, `NOTY_MEDIA_API_KEY`,
    /// `NOTY_MEDIA_API_SECRET`. Optional: `NOTY_MEDIA_FOLDER`,
    /// `NOTY_MEDIA_TIMEOUT_SECS`.
    ///
    /// Returns `None` when any required secret is unset, letting the caller
    /// run without an image provider (the gateway then answers with its
    /// configuration error and performs no network call).
    pub fn from_env() -> Option<Self> {
        let cloud_name = non_empty_var("NOTY_MEDIA_CLOUD_NAME")?;
        let api_key = non_empty_var("NOTY_MEDIA_API_KEY")?;
        let api_secret = non_empty_var("NOTY_MEDIA_API_SECRET")?;

        let folder = std::env::var("NOTY_MEDIA_FOLDER")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::UPLOAD_FOLDER.to_string());
        let timeout_secs = std::env::var("NOTY_MEDIA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::MEDIA_TIMEOUT_SECS);

        Some(Self {
            cloud_name,
            api_key,
            api_secret,
            folder,
            timeout_secs,
        })
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.cloud_name.is_empty() {
            return Err(Error::Config("media cloud name cannot be empty".into()));
        }
        if self.api_key.is_empty() {
            return Err(Error::Config("media API key cannot be empty".into()));
        }
        if self.api_secret.is_empty() {
            return Err(Error::Config("media API secret cannot be empty".into()));
        }
        if self.folder.is_empty() {
            return Err(Error::Config("media folder cannot be empty".into()));
        }
        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
