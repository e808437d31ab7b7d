//! Session handlers: signup, login, refresh, logout, current user.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use noty_core::{AuthUser, Credentials, Session};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Register a new account.
#[utoipa::path(post, path = "/api/v1/auth/signup", tag = "Auth",
    responses(
        (status = 200, description = "Account created, session issued", body = Session),
        (status = 409, description = "Email already registered"),
    ))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, ApiError> {
    let session = state.auth.sign_up(credentials).await?;
    info!(email = %session.user.email, "Account created");
    Ok(Json(session))
}

/// Sign in with email and password.
#[utoipa::path(post, path = "/api/v1/auth/login", tag = "Auth",
    responses(
        (status = 200, description = "Session issued", body = Session),
        (status = 401, description = "Invalid credentials"),
    ))]
pub async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<Session>, ApiError> {
    let session = state.auth.sign_in(credentials).await?;
    Ok(Json(session))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Exchange a refresh token for a fresh session.
pub async fn refresh_session(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<Session>, ApiError> {
    let session = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(session))
}

/// Invalidate the caller's session.
pub async fn sign_out(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.auth.sign_out(&user.token).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// The user behind the presented token.
pub async fn current_user(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<AuthUser>, ApiError> {
    Ok(Json(AuthUser {
        id: user.id,
        email: user.email,
    }))
}
