//! Data backend configuration.

use noty_core::{defaults, Error, Result};

/// Connection settings for the remote data backend.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Base URL of the backend (no trailing slash).
    pub url: String,
    /// Anonymous API key, sent as the `apikey` header on every request.
    pub anon_key: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl DataConfig {
    /// Read configuration from the environment.
    ///
    /// Required: `NOTY_DATA_URL`, `NOTY_DATA_ANON_KEY`. Optional:
    /// `NOTY_DATA_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("NOTY_DATA_URL")
            .map_err(|_| Error::Config("NOTY_DATA_URL is not set".into()))?;
        let anon_key = std::env::var("NOTY_DATA_ANON_KEY")
            .map_err(|_| Error::Config("NOTY_DATA_ANON_KEY is not set".into()))?;
        let timeout_secs = std::env::var("NOTY_DATA_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::DATA_TIMEOUT_SECS);

        let config = Self {
            url,
            anon_key,
            timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::Config("data backend URL cannot be empty".into()));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(Error::Config(format!(
                "data backend URL must start with http:// or https://, got: {}",
                self.url
            )));
        }
        if self.anon_key.is_empty() {
            return Err(Error::Config("data backend anon key cannot be empty".into()));
        }
        Ok(())
    }
}
