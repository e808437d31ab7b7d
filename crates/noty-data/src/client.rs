//! REST client for the data backend's table API.
//!
//! Every row operation goes through `{base}/rest/v1/{table}` with
//! query-string filters (`column=eq.value`, `order=...`,
//! `or=(...)`). The anonymous key rides along as the `apikey` header and
//! the caller's access token as the bearer; row-level security on the
//! backend scopes every query to that token's user.
//!
//! Calls are fire-and-await with a single attempt: no retries, no backoff,
//! no caching. Consistency comes from reloading after each mutation.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use noty_core::{Error, Result};

use crate::config::DataConfig;

/// Client for the remote data backend's table REST API.
#[derive(Clone)]
pub struct DataBackend {
    client: Client,
    base_url: String,
    anon_key: String,
}

/// Format an equality filter value (`eq.<value>`).
pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// Structured error body returned by the backend.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[allow(dead_code)]
    details: Option<Value>,
    #[allow(dead_code)]
    hint: Option<Value>,
}

impl DataBackend {
    /// Create a client from validated configuration.
    pub fn new(config: DataConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        info!(url = %config.url, "Initializing data backend client");

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
        })
    }

    /// Base URL for a table.
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Base URL for an auth endpoint.
    pub(crate) fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{endpoint}", self.base_url)
    }

    /// Start a request with the `apikey` and bearer headers attached.
    pub(crate) fn request(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
    }

    /// SELECT rows.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!(table, "select");
        let response = self
            .request(Method::GET, &self.rest_url(table), token)
            .query(query)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// SELECT exactly one row; zero rows is `NotFound`.
    pub(crate) async fn select_one<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let response = self
            .request(Method::GET, &self.rest_url(table), token)
            .header("Accept", "application/vnd.pgrst.object+json")
            .query(query)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// INSERT rows, returning the stored representation.
    pub(crate) async fn insert<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        body: Value,
    ) -> Result<Vec<T>> {
        debug!(table, "insert");
        let response = self
            .request(Method::POST, &self.rest_url(table), token)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// UPDATE matching rows, returning the stored representation.
    pub(crate) async fn update<T: DeserializeOwned>(
        &self,
        token: &str,
        table: &str,
        query: &[(&str, String)],
        body: Value,
    ) -> Result<Vec<T>> {
        debug!(table, "update");
        let response = self
            .request(Method::PATCH, &self.rest_url(table), token)
            .header("Prefer", "return=representation")
            .query(query)
            .json(&body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// DELETE matching rows.
    pub(crate) async fn delete(
        &self,
        token: &str,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<()> {
        debug!(table, "delete");
        let response = self
            .request(Method::DELETE, &self.rest_url(table), token)
            .query(query)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Map a non-2xx response to the error taxonomy.
    pub(crate) async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, "Data backend returned an error");
        Err(Self::map_error_body(status, &body))
    }

    /// Translate the backend's structured error body.
    ///
    /// The uniqueness-violation code `23505` becomes [`Error::Duplicate`]
    /// so the API layer can answer with the friendly duplicate-share
    /// message; the singular-select miss `PGRST116` becomes `NotFound`.
    pub(crate) fn map_error_body(status: StatusCode, body: &str) -> Error {
        let parsed: Option<BackendErrorBody> = serde_json::from_str(body).ok();
        let code = parsed.as_ref().and_then(|e| e.code.clone());
        let message = parsed
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("Data backend returned status {status}")
                } else {
                    body.trim().to_string()
                }
            });

        match (status, code.as_deref()) {
            (_, Some("23505")) => Error::Duplicate(message),
            (_, Some("PGRST116")) => Error::NotFound(message),
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => Error::Unauthorized(message),
            (StatusCode::NOT_FOUND, _) => Error::NotFound(message),
            _ if message.contains("duplicate key") => Error::Duplicate(message),
            _ => Error::Remote {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Take the first returned row of a representation response.
pub(crate) fn first_row<T>(rows: Vec<T>, what: &str) -> Result<T> {
    rows.into_iter()
        .next()
        .ok_or_else(|| Error::Remote {
            status: 200,
            message: format!("Backend returned no {what} row"),
        })
}
