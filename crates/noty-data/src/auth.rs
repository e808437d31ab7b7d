//! Session/auth client.
//!
//! Wraps the data backend's auth endpoints: signup, password and
//! refresh-token grants, user resolution, and logout. `resolve` is the
//! single authoritative session resolution: the API layer calls it once
//! per request and trusts the answer for the request's lifetime, instead
//! of reconciling a session listener against an initial check.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use noty_core::{AuthProvider, AuthUser, Credentials, Error, Result, Session};

use crate::client::DataBackend;

/// Auth client over the backend session endpoints.
#[derive(Clone)]
pub struct AuthClient {
    backend: DataBackend,
}

impl AuthClient {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl AuthProvider for AuthClient {
    async fn sign_up(&self, credentials: Credentials) -> Result<Session> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(Error::InvalidInput("Email and password are required".into()));
        }

        let response = self
            .backend
            .request(Method::POST, &self.backend.auth_url("signup"), "")
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        let response = DataBackend::check(response).await.map_err(auth_error)?;
        Ok(response.json().await?)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session> {
        let response = self
            .backend
            .request(
                Method::POST,
                &format!("{}?grant_type=password", self.backend.auth_url("token")),
                "",
            )
            .json(&serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        let response = DataBackend::check(response).await.map_err(auth_error)?;
        debug!(email = %credentials.email, "Signed in");
        Ok(response.json().await?)
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        let response = self
            .backend
            .request(Method::POST, &self.backend.auth_url("logout"), token)
            .send()
            .await?;
        DataBackend::check(response).await?;
        Ok(())
    }

    async fn resolve(&self, token: &str) -> Result<AuthUser> {
        let response = self
            .backend
            .request(Method::GET, &self.backend.auth_url("user"), token)
            .send()
            .await?;
        let response = DataBackend::check(response).await.map_err(auth_error)?;
        Ok(response.json().await?)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        let response = self
            .backend
            .request(
                Method::POST,
                &format!("{}?grant_type=refresh_token", self.backend.auth_url("token")),
                "",
            )
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        let response = DataBackend::check(response).await.map_err(auth_error)?;
        Ok(response.json().await?)
    }
}

/// The auth endpoints answer 400 for bad credentials; everything
/// credential-shaped should surface as `Unauthorized`, not `Remote`.
fn auth_error(err: Error) -> Error {
    match err {
        Error::Remote { status, message } if status == 400 || status == 422 => {
            Error::Unauthorized(message)
        }
        other => other,
    }
}
