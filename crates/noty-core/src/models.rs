//! Core data models for the noty backend.
//!
//! These types mirror the remote data backend's tables. The backend owns
//! the schema; the application's obligation is to construct well-formed
//! rows and to keep the client-side invariants (ordering indices, the
//! single-tag rule) intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTES
// =============================================================================

/// A user-owned note.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A gallery image attached to a note.
///
/// `order_index` is assigned as `max(existing) + 1` on insert and is never
/// re-compacted on delete; gaps are expected and only relative order is
/// meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteImage {
    pub id: Uuid,
    pub note_id: Uuid,
    pub image_url: String,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// A checklist row scoped to a note (the backend's `tasks` table).
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NoteChecklistItem {
    pub id: Uuid,
    pub note_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// TASKS
// =============================================================================

/// A standalone user task (the backend's `user_tasks` table).
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A checklist row belonging to a task.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TaskChecklistItem {
    pub id: Uuid,
    pub task_id: Uuid,
    pub title: String,
    pub completed: bool,
    pub order_index: i32,
    pub created_at: DateTime<Utc>,
}

/// A task together with its checklist, as the task list view consumes it.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TaskWithChecklist {
    #[serde(flatten)]
    pub task: Task,
    pub checklist_items: Vec<TaskChecklistItem>,
}

// =============================================================================
// TAGS
// =============================================================================

/// A global, predefined category attachable to notes or tasks.
///
/// The catalog is not user-owned; `icon` names a glyph in the client's icon
/// set and `color` is a CSS color token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub color: String,
}

// =============================================================================
// SHARING
// =============================================================================

/// A note shared with another user by email reference.
///
/// `shared_with_user_id` is null when the recipient email has no profile
/// yet; the share still matches them by email once they register.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SharedNote {
    pub id: Uuid,
    pub note_id: Uuid,
    pub owner_id: Uuid,
    pub shared_with_email: String,
    pub shared_with_user_id: Option<Uuid>,
    pub can_edit: bool,
    pub created_at: DateTime<Utc>,
}

/// A share joined with the note it refers to, for the shared-notes views.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ShareWithNote {
    #[serde(flatten)]
    pub share: SharedNote,
    pub note: Note,
}

// =============================================================================
// PROFILES & AUTH
// =============================================================================

/// A user profile mirroring the auth user id.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The authenticated user behind a session token.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// A session issued by the data backend's auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Email/password credentials for signup and login.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Request for creating a note.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

/// Request for updating a note. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// `Some(None)` clears the cover image; absent leaves it untouched.
    #[serde(default, with = "double_option")]
    pub cover_image_url: Option<Option<String>>,
}

/// Request for creating a task, optionally with initial checklist rows.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub tag_id: Option<Uuid>,
}

/// Request for updating a task.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Request for sharing a note with a recipient email.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct ShareNoteRequest {
    pub note_id: Uuid,
    pub email: String,
    #[serde(default = "default_can_edit")]
    pub can_edit: bool,
}

fn default_can_edit() -> bool {
    true
}

/// Request for updating the caller's profile.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Serde helper distinguishing "field absent" from "field set to null".
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}
