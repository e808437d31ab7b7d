//! Note handlers: CRUD plus the gallery, checklist, and tag sub-resources.
//!
//! Mutations return the stored row; list views re-fetch after mutating
//! (there is no optimistic update or cache layer to invalidate).

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use noty_core::{
    tag_rule, CreateNoteRequest, Note, NoteChecklistItem, NoteImage, Tag, UpdateNoteRequest,
};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// List the caller's notes, most recently updated first.
#[utoipa::path(get, path = "/api/v1/notes", tag = "Notes",
    responses((status = 200, description = "The caller's notes", body = [Note])))]
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list(&user.token, user.id).await?;
    Ok(Json(notes))
}

/// Create a note.
#[utoipa::path(post, path = "/api/v1/notes", tag = "Notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Stored note", body = Note),
        (status = 400, description = "Title missing"),
    ))]
pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".into()));
    }
    let note = state.notes.create(&user.token, user.id, req).await?;
    Ok(Json(note))
}

pub async fn get_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.get(&user.token, id).await?;
    Ok(Json(note))
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNoteRequest>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.update(&user.token, id, req).await?;
    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.notes.delete(&user.token, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// =============================================================================
// GALLERY
// =============================================================================

pub async fn list_note_images(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Vec<NoteImage>>, ApiError> {
    let images = state.note_images.list(&user.token, note_id).await?;
    Ok(Json(images))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddImageRequest {
    pub image_url: String,
}

/// Append an image URL to the gallery.
///
/// The URL comes from a prior `/api/upload` round trip; this endpoint only
/// records it and assigns the next ordering index.
pub async fn add_note_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
    Json(req): Json<AddImageRequest>,
) -> Result<Json<NoteImage>, ApiError> {
    if req.image_url.trim().is_empty() {
        return Err(ApiError::BadRequest("Image URL is required".into()));
    }
    let image = state
        .note_images
        .add(&user.token, note_id, &req.image_url)
        .await?;
    Ok(Json(image))
}

pub async fn delete_note_image(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((_note_id, image_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.note_images.remove(&user.token, image_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// =============================================================================
// CHECKLIST
// =============================================================================

pub async fn list_note_checklist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Vec<NoteChecklistItem>>, ApiError> {
    let items = state.note_checklist.list(&user.token, note_id).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddChecklistItemRequest {
    pub title: String,
}

pub async fn add_note_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
    Json(req): Json<AddChecklistItemRequest>,
) -> Result<Json<NoteChecklistItem>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Item title is required".into()));
    }
    let item = state
        .note_checklist
        .add(&user.token, note_id, &req.title)
        .await?;
    Ok(Json(item))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetCompletedRequest {
    pub completed: bool,
}

pub async fn set_note_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((_note_id, item_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetCompletedRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .note_checklist
        .set_completed(&user.token, item_id, req.completed)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn delete_note_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((_note_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.note_checklist.remove(&user.token, item_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// =============================================================================
// TAGS
// =============================================================================

pub async fn get_note_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.tags.tags_for_note(&user.token, note_id).await?;
    Ok(Json(tags))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SetTagsRequest {
    pub tag_ids: Vec<Uuid>,
}

/// Replace the note's tag assignment.
///
/// The body carries a list for interface symmetry with the storage model,
/// but the single-tag rule rejects anything beyond one element.
pub async fn set_note_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(note_id): Path<Uuid>,
    Json(req): Json<SetTagsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tag_id = tag_rule::validate_selection(&req.tag_ids)?;
    state
        .tags
        .set_note_tag(&user.token, note_id, tag_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
