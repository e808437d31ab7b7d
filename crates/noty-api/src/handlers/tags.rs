//! Tag catalog handler.

use axum::extract::State;
use axum::{Extension, Json};

use noty_core::Tag;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// The global tag catalog, ordered by name.
#[utoipa::path(get, path = "/api/v1/tags", tag = "Tags",
    responses((status = 200, description = "Tag catalog", body = [Tag])))]
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.tags.list(&user.token).await?;
    Ok(Json(tags))
}
