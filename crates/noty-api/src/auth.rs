//! Bearer-token auth middleware.
//!
//! The token is resolved against the data backend exactly once per
//! request; the result rides in request extensions as [`CurrentUser`].
//! There is no secondary session check to reconcile; this resolution is
//! authoritative for the request's lifetime.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, injected by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    /// The raw access token, passed through to the data backend so its
    /// row-level security sees the same identity.
    pub token: String,
}

/// Extract the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Require a valid session on every request passing through.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let user = state
        .auth
        .resolve(&token)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid or expired session".into()))?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        email: user.email,
        token,
    });
    Ok(next.run(request).await)
}

/// Global rate limit, checked before any handler work.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            return Err(ApiError::TooManyRequests);
        }
    }
    Ok(next.run(request).await)
}
