//! Store traits for the noty backend.
//!
//! These traits are the seams between the HTTP layer and the remote
//! collaborators. `noty-data` implements the data-backend stores,
//! `noty-media` implements [`ImageStore`], and the test suites substitute
//! in-memory mocks.
//!
//! Every method takes the caller's access token where the backend enforces
//! row-level security; the stores pass it through verbatim and never cache
//! rows across calls.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

/// Repository for note CRUD operations.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// List the caller's notes, most recently updated first.
    async fn list(&self, token: &str, user_id: Uuid) -> Result<Vec<Note>>;

    /// Fetch a single note by id.
    async fn get(&self, token: &str, id: Uuid) -> Result<Note>;

    /// Insert a new note owned by `user_id`.
    async fn create(&self, token: &str, user_id: Uuid, req: CreateNoteRequest) -> Result<Note>;

    /// Apply a partial update and return the updated row.
    async fn update(&self, token: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Delete a note. Child rows cascade on the backend.
    async fn delete(&self, token: &str, id: Uuid) -> Result<()>;
}

/// Repository for a note's image gallery.
#[async_trait]
pub trait NoteImageStore: Send + Sync {
    /// List gallery images ordered by `order_index` ascending.
    async fn list(&self, token: &str, note_id: Uuid) -> Result<Vec<NoteImage>>;

    /// Append an image, assigning `max(order_index) + 1`.
    async fn add(&self, token: &str, note_id: Uuid, image_url: &str) -> Result<NoteImage>;

    /// Remove one image. Remaining indices are not re-compacted.
    async fn remove(&self, token: &str, image_id: Uuid) -> Result<()>;
}

/// Repository for a note's checklist rows.
#[async_trait]
pub trait NoteChecklistStore: Send + Sync {
    async fn list(&self, token: &str, note_id: Uuid) -> Result<Vec<NoteChecklistItem>>;

    /// Append an item, assigning `max(order_index) + 1`.
    async fn add(&self, token: &str, note_id: Uuid, title: &str) -> Result<NoteChecklistItem>;

    async fn set_completed(&self, token: &str, item_id: Uuid, completed: bool) -> Result<()>;

    async fn remove(&self, token: &str, item_id: Uuid) -> Result<()>;
}

/// Repository for standalone task CRUD operations.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// List the caller's tasks with their checklists.
    async fn list(&self, token: &str, user_id: Uuid) -> Result<Vec<TaskWithChecklist>>;

    async fn get(&self, token: &str, id: Uuid) -> Result<Task>;

    /// Insert a task plus its initial checklist rows.
    async fn create(&self, token: &str, user_id: Uuid, req: CreateTaskRequest) -> Result<Task>;

    async fn update(&self, token: &str, id: Uuid, req: UpdateTaskRequest) -> Result<Task>;

    async fn delete(&self, token: &str, id: Uuid) -> Result<()>;
}

/// Repository for a task's checklist rows.
#[async_trait]
pub trait TaskChecklistStore: Send + Sync {
    async fn list(&self, token: &str, task_id: Uuid) -> Result<Vec<TaskChecklistItem>>;

    /// Append an item, assigning `max(order_index) + 1`.
    async fn add(&self, token: &str, task_id: Uuid, title: &str) -> Result<TaskChecklistItem>;

    async fn set_completed(&self, token: &str, item_id: Uuid, completed: bool) -> Result<()>;

    async fn remove(&self, token: &str, item_id: Uuid) -> Result<()>;
}

/// Repository for the global tag catalog and tag assignments.
///
/// The join tables are many-to-many on the backend; callers enforce the
/// single-tag rule via [`crate::tag_rule::validate_selection`] before
/// calling the `set_*` methods, which have replace semantics.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// The full catalog, ordered by name.
    async fn list(&self, token: &str) -> Result<Vec<Tag>>;

    async fn tags_for_note(&self, token: &str, note_id: Uuid) -> Result<Vec<Tag>>;

    /// Replace the note's tag assignment with the given tag (or clear it).
    async fn set_note_tag(&self, token: &str, note_id: Uuid, tag_id: Option<Uuid>) -> Result<()>;

    async fn tags_for_task(&self, token: &str, task_id: Uuid) -> Result<Vec<Tag>>;

    /// Replace the task's tag assignment with the given tag (or clear it).
    async fn set_task_tag(&self, token: &str, task_id: Uuid, tag_id: Option<Uuid>) -> Result<()>;
}

/// Repository for note shares.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Shares where the caller is the recipient, matched by email or id.
    async fn shared_with_me(
        &self,
        token: &str,
        email: &str,
        user_id: Uuid,
    ) -> Result<Vec<ShareWithNote>>;

    /// Shares the caller created.
    async fn shared_by_me(&self, token: &str, owner_id: Uuid) -> Result<Vec<ShareWithNote>>;

    /// Create a share. A repeated (note, recipient) pair surfaces as
    /// [`crate::error::Error::Duplicate`].
    async fn create(
        &self,
        token: &str,
        owner_id: Uuid,
        note_id: Uuid,
        email: &str,
        recipient_id: Option<Uuid>,
        can_edit: bool,
    ) -> Result<SharedNote>;

    async fn remove(&self, token: &str, share_id: Uuid) -> Result<()>;
}

/// Repository for user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, token: &str, user_id: Uuid) -> Result<Profile>;

    /// Look up a profile by exact email; `None` when unregistered.
    async fn find_by_email(&self, token: &str, email: &str) -> Result<Option<Profile>>;

    /// Substring search over email/full name for the share dialog,
    /// excluding the caller.
    async fn search(&self, token: &str, query: &str, exclude: Uuid) -> Result<Vec<Profile>>;

    async fn update(
        &self,
        token: &str,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Profile>;
}

/// The data backend's session/auth endpoints.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, credentials: Credentials) -> Result<Session>;

    async fn sign_in(&self, credentials: Credentials) -> Result<Session>;

    async fn sign_out(&self, token: &str) -> Result<()>;

    /// Resolve a bearer token to its user. This is the single authoritative
    /// session resolution; callers must not layer their own recheck logic
    /// on top of it.
    async fn resolve(&self, token: &str) -> Result<AuthUser>;

    async fn refresh(&self, refresh_token: &str) -> Result<Session>;
}

/// The remote image store.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persist one image and return its public HTTPS URL.
    ///
    /// Every call stores a new asset; identical bytes produce distinct
    /// URLs. Deduplication is out of scope.
    async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String>;

    /// Delete a stored asset by provider public id.
    async fn delete(&self, public_id: &str) -> Result<()>;
}
