//! Share handlers.
//!
//! A share references its recipient by email. The recipient may not be
//! registered yet; the share row then carries a null user id and matches
//! them by email once they sign up. Re-sharing the same note with the
//! same recipient trips the backend's unique constraint, translated here
//! into the friendly duplicate message the views display verbatim.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use noty_core::{CreateNoteRequest, Error, Note, ShareNoteRequest, SharedNote, ShareWithNote};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Message shown when a (note, recipient) pair is shared twice.
const DUPLICATE_SHARE_MESSAGE: &str = "You have already shared this note with that user";

/// Both directions of the caller's shares.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ShareListResponse {
    pub shared_with_me: Vec<ShareWithNote>,
    pub shared_by_me: Vec<ShareWithNote>,
}

/// List incoming and outgoing shares.
#[utoipa::path(get, path = "/api/v1/shares", tag = "Shares",
    responses((status = 200, description = "Incoming and outgoing shares", body = ShareListResponse)))]
pub async fn list_shares(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ShareListResponse>, ApiError> {
    let shared_with_me = state
        .shares
        .shared_with_me(&user.token, &user.email, user.id)
        .await?;
    let shared_by_me = state.shares.shared_by_me(&user.token, user.id).await?;
    Ok(Json(ShareListResponse {
        shared_with_me,
        shared_by_me,
    }))
}

/// Share a note with a recipient email.
#[utoipa::path(post, path = "/api/v1/shares", tag = "Shares",
    request_body = ShareNoteRequest,
    responses(
        (status = 200, description = "Share created", body = SharedNote),
        (status = 409, description = "Already shared with that recipient"),
    ))]
pub async fn create_share(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ShareNoteRequest>,
) -> Result<Json<SharedNote>, ApiError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::BadRequest("Recipient email is required".into()));
    }
    if email == user.email.to_lowercase() {
        return Err(ApiError::BadRequest(
            "You cannot share a note with yourself".into(),
        ));
    }

    // Unregistered recipients get a null user id; the share matches them
    // by email after signup
    let recipient = state.profiles.find_by_email(&user.token, &email).await?;
    let share = state
        .shares
        .create(
            &user.token,
            user.id,
            req.note_id,
            &email,
            recipient.map(|p| p.id),
            req.can_edit,
        )
        .await
        .map_err(friendly_duplicate)?;

    info!(note_id = %req.note_id, recipient = %email, "Note shared");
    Ok(Json(share))
}

pub async fn delete_share(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(share_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.shares.remove(&user.token, share_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Request for creating a note and sharing it in one step.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateSharedNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    pub recipient_emails: Vec<String>,
    #[serde(default = "default_can_edit")]
    pub can_edit: bool,
}

fn default_can_edit() -> bool {
    true
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateSharedNoteResponse {
    pub note: Note,
    pub shares: Vec<SharedNote>,
}

/// Create a note and share it with each recipient in one request.
pub async fn create_shared_note(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateSharedNoteRequest>,
) -> Result<Json<CreateSharedNoteResponse>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".into()));
    }
    if req.recipient_emails.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one recipient is required".into(),
        ));
    }

    let note = state
        .notes
        .create(
            &user.token,
            user.id,
            CreateNoteRequest {
                title: req.title,
                content: req.content,
                cover_image_url: req.cover_image_url,
            },
        )
        .await?;

    let mut shares = Vec::with_capacity(req.recipient_emails.len());
    for email in &req.recipient_emails {
        let email = email.trim().to_lowercase();
        if email.is_empty() || email == user.email.to_lowercase() {
            continue;
        }
        let recipient = state.profiles.find_by_email(&user.token, &email).await?;
        let share = state
            .shares
            .create(
                &user.token,
                user.id,
                note.id,
                &email,
                recipient.map(|p| p.id),
                req.can_edit,
            )
            .await
            .map_err(friendly_duplicate)?;
        shares.push(share);
    }

    info!(note_id = %note.id, recipients = shares.len(), "Shared note created");
    Ok(Json(CreateSharedNoteResponse { note, shares }))
}

/// Profile search for the share dialog.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_profiles(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<noty_core::Profile>>, ApiError> {
    let profiles = state.profiles.search(&user.token, &query.q, user.id).await?;
    Ok(Json(profiles))
}

fn friendly_duplicate(err: Error) -> ApiError {
    match err {
        Error::Duplicate(_) => ApiError::Conflict(DUPLICATE_SHARE_MESSAGE.into()),
        other => other.into(),
    }
}
