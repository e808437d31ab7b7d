//! Profile handlers.

use axum::extract::State;
use axum::{Extension, Json};

use noty_core::{Profile, UpdateProfileRequest};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// The caller's profile.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.get(&user.token, user.id).await?;
    Ok(Json(profile))
}

/// Update the caller's display name and avatar.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let profile = state.profiles.update(&user.token, user.id, req).await?;
    Ok(Json(profile))
}
