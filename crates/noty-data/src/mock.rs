//! In-memory mock backend for deterministic testing.
//!
//! Implements every store trait from `noty-core` over shared in-process
//! state, so the API layer can be exercised without a network. Row-level
//! security is not emulated (tests pass whichever token they minted), but
//! cascade deletes, ordering-index assignment, the duplicate-share
//! constraint, and auth session resolution all behave like the real
//! backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use noty_core::{
    AuthProvider, AuthUser, CreateNoteRequest, CreateTaskRequest, Credentials, Error, Note,
    NoteChecklistItem, NoteChecklistStore, NoteImage, NoteImageStore, NoteStore, Profile,
    ProfileStore, Result, Session, SharedNote, ShareStore, ShareWithNote, Tag, TagStore, Task,
    TaskChecklistItem, TaskChecklistStore, TaskStore, TaskWithChecklist, UpdateNoteRequest,
    UpdateProfileRequest, UpdateTaskRequest,
};

use crate::note_images::next_order_index;

#[derive(Default)]
struct MockState {
    notes: HashMap<Uuid, Note>,
    note_images: HashMap<Uuid, NoteImage>,
    note_checklist: HashMap<Uuid, NoteChecklistItem>,
    tasks: HashMap<Uuid, Task>,
    task_checklist: HashMap<Uuid, TaskChecklistItem>,
    tags: Vec<Tag>,
    note_tags: HashMap<Uuid, Vec<Uuid>>,
    task_tags: HashMap<Uuid, Vec<Uuid>>,
    shares: HashMap<Uuid, SharedNote>,
    profiles: HashMap<Uuid, Profile>,
    credentials: HashMap<String, (Uuid, String)>,
    sessions: HashMap<String, AuthUser>,
    failure: Option<String>,
}

/// Shared in-memory backend implementing every store trait.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
    token_counter: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the global tag catalog.
    pub fn with_tags(self, tags: Vec<Tag>) -> Self {
        self.state.lock().unwrap().tags = tags;
        self
    }

    /// Make every subsequent store call fail as a remote-service error.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().failure = Some(message.into());
        self
    }

    /// Register a user with credentials and a profile row.
    pub fn seed_user(&self, email: &str, password: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state
            .credentials
            .insert(email.to_string(), (id, password.to_string()));
        state.profiles.insert(
            id,
            Profile {
                id,
                email: email.to_string(),
                full_name: None,
                avatar_url: None,
                updated_at: None,
            },
        );
        id
    }

    /// Make a fixed token resolve to an existing user.
    pub fn seed_session(&self, token: &str, user_id: Uuid) {
        let mut state = self.state.lock().unwrap();
        let email = state
            .profiles
            .get(&user_id)
            .map(|p| p.email.clone())
            .unwrap_or_default();
        state
            .sessions
            .insert(token.to_string(), AuthUser { id: user_id, email });
    }

    /// Insert a note directly, bypassing validation.
    pub fn seed_note(&self, user_id: Uuid, title: &str) -> Note {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            content: None,
            cover_image_url: None,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .notes
            .insert(note.id, note.clone());
        note
    }

    fn check_failure(&self) -> Result<()> {
        if let Some(message) = self.state.lock().unwrap().failure.clone() {
            return Err(Error::Remote {
                status: 500,
                message,
            });
        }
        Ok(())
    }

    fn mint_session(&self, user: AuthUser) -> Session {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst);
        let access_token = format!("mock-token-{n}");
        let refresh_token = format!("mock-refresh-{n}");
        let mut state = self.state.lock().unwrap();
        state.sessions.insert(access_token.clone(), user.clone());
        state
            .sessions
            .insert(refresh_token.clone(), user.clone());
        Session {
            access_token,
            refresh_token,
            expires_in: 3600,
            user,
        }
    }
}

#[async_trait]
impl NoteStore for MockBackend {
    async fn list(&self, _token: &str, user_id: Uuid) -> Result<Vec<Note>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut notes: Vec<Note> = state
            .notes
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }

    async fn get(&self, _token: &str, id: Uuid) -> Result<Note> {
        self.check_failure()?;
        self.state
            .lock()
            .unwrap()
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Note {id} not found")))
    }

    async fn create(&self, _token: &str, user_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        self.check_failure()?;
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput("Title is required".into()));
        }
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            user_id,
            title: req.title,
            content: req.content,
            cover_image_url: req.cover_image_url,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .notes
            .insert(note.id, note.clone());
        Ok(note)
    }

    async fn update(&self, _token: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let note = state
            .notes
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Note {id} not found")))?;
        if let Some(title) = req.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Title is required".into()));
            }
            note.title = title;
        }
        if let Some(content) = req.content {
            note.content = Some(content);
        }
        if let Some(cover) = req.cover_image_url {
            note.cover_image_url = cover;
        }
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, _token: &str, id: Uuid) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.notes.remove(&id);
        // Child rows cascade like the backend's foreign keys
        state.note_images.retain(|_, img| img.note_id != id);
        state.note_checklist.retain(|_, item| item.note_id != id);
        state.note_tags.remove(&id);
        state.shares.retain(|_, share| share.note_id != id);
        Ok(())
    }
}

#[async_trait]
impl NoteImageStore for MockBackend {
    async fn list(&self, _token: &str, note_id: Uuid) -> Result<Vec<NoteImage>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut images: Vec<NoteImage> = state
            .note_images
            .values()
            .filter(|img| img.note_id == note_id)
            .cloned()
            .collect();
        images.sort_by_key(|img| img.order_index);
        Ok(images)
    }

    async fn add(&self, token: &str, note_id: Uuid, image_url: &str) -> Result<NoteImage> {
        let existing = NoteImageStore::list(self, token, note_id).await?;
        let image = NoteImage {
            id: Uuid::new_v4(),
            note_id,
            image_url: image_url.to_string(),
            order_index: next_order_index(existing.iter().map(|img| img.order_index)),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .note_images
            .insert(image.id, image.clone());
        Ok(image)
    }

    async fn remove(&self, _token: &str, image_id: Uuid) -> Result<()> {
        self.check_failure()?;
        self.state.lock().unwrap().note_images.remove(&image_id);
        Ok(())
    }
}

#[async_trait]
impl NoteChecklistStore for MockBackend {
    async fn list(&self, _token: &str, note_id: Uuid) -> Result<Vec<NoteChecklistItem>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut items: Vec<NoteChecklistItem> = state
            .note_checklist
            .values()
            .filter(|item| item.note_id == note_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.order_index);
        Ok(items)
    }

    async fn add(&self, token: &str, note_id: Uuid, title: &str) -> Result<NoteChecklistItem> {
        let existing = NoteChecklistStore::list(self, token, note_id).await?;
        let item = NoteChecklistItem {
            id: Uuid::new_v4(),
            note_id,
            title: title.to_string(),
            completed: false,
            order_index: next_order_index(existing.iter().map(|item| item.order_index)),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .note_checklist
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn set_completed(&self, _token: &str, item_id: Uuid, completed: bool) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .note_checklist
            .get_mut(&item_id)
            .ok_or_else(|| Error::NotFound(format!("Checklist item {item_id} not found")))?;
        item.completed = completed;
        Ok(())
    }

    async fn remove(&self, _token: &str, item_id: Uuid) -> Result<()> {
        self.check_failure()?;
        self.state.lock().unwrap().note_checklist.remove(&item_id);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MockBackend {
    async fn list(&self, _token: &str, user_id: Uuid) -> Result<Vec<TaskWithChecklist>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks
            .into_iter()
            .map(|task| {
                let mut checklist_items: Vec<TaskChecklistItem> = state
                    .task_checklist
                    .values()
                    .filter(|item| item.task_id == task.id)
                    .cloned()
                    .collect();
                checklist_items.sort_by_key(|item| item.order_index);
                TaskWithChecklist {
                    task,
                    checklist_items,
                }
            })
            .collect())
    }

    async fn get(&self, _token: &str, id: Uuid) -> Result<Task> {
        self.check_failure()?;
        self.state
            .lock()
            .unwrap()
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Task {id} not found")))
    }

    async fn create(&self, _token: &str, user_id: Uuid, req: CreateTaskRequest) -> Result<Task> {
        self.check_failure()?;
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput("Title is required".into()));
        }
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            title: req.title,
            description: req.description,
            completed: false,
            order_index: 0,
            created_at: now,
            updated_at: now,
        };
        let mut state = self.state.lock().unwrap();
        state.tasks.insert(task.id, task.clone());
        for (index, title) in req
            .checklist
            .iter()
            .filter(|t| !t.trim().is_empty())
            .enumerate()
        {
            let item = TaskChecklistItem {
                id: Uuid::new_v4(),
                task_id: task.id,
                title: title.clone(),
                completed: false,
                order_index: index as i32,
                created_at: now,
            };
            state.task_checklist.insert(item.id, item);
        }
        Ok(task)
    }

    async fn update(&self, _token: &str, id: Uuid, req: UpdateTaskRequest) -> Result<Task> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Task {id} not found")))?;
        if let Some(title) = req.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Title is required".into()));
            }
            task.title = title;
        }
        if let Some(description) = req.description {
            task.description = Some(description);
        }
        if let Some(completed) = req.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete(&self, _token: &str, id: Uuid) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        state.tasks.remove(&id);
        state.task_checklist.retain(|_, item| item.task_id != id);
        state.task_tags.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TaskChecklistStore for MockBackend {
    async fn list(&self, _token: &str, task_id: Uuid) -> Result<Vec<TaskChecklistItem>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut items: Vec<TaskChecklistItem> = state
            .task_checklist
            .values()
            .filter(|item| item.task_id == task_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| item.order_index);
        Ok(items)
    }

    async fn add(&self, token: &str, task_id: Uuid, title: &str) -> Result<TaskChecklistItem> {
        let existing = TaskChecklistStore::list(self, token, task_id).await?;
        let item = TaskChecklistItem {
            id: Uuid::new_v4(),
            task_id,
            title: title.to_string(),
            completed: false,
            order_index: next_order_index(existing.iter().map(|item| item.order_index)),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .task_checklist
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn set_completed(&self, _token: &str, item_id: Uuid, completed: bool) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let item = state
            .task_checklist
            .get_mut(&item_id)
            .ok_or_else(|| Error::NotFound(format!("Checklist item {item_id} not found")))?;
        item.completed = completed;
        Ok(())
    }

    async fn remove(&self, _token: &str, item_id: Uuid) -> Result<()> {
        self.check_failure()?;
        self.state.lock().unwrap().task_checklist.remove(&item_id);
        Ok(())
    }
}

#[async_trait]
impl TagStore for MockBackend {
    async fn list(&self, _token: &str) -> Result<Vec<Tag>> {
        self.check_failure()?;
        let mut tags = self.state.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn tags_for_note(&self, _token: &str, note_id: Uuid) -> Result<Vec<Tag>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let ids = state.note_tags.get(&note_id).cloned().unwrap_or_default();
        Ok(state
            .tags
            .iter()
            .filter(|tag| ids.contains(&tag.id))
            .cloned()
            .collect())
    }

    async fn set_note_tag(&self, _token: &str, note_id: Uuid, tag_id: Option<Uuid>) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        match tag_id {
            Some(tag_id) => state.note_tags.insert(note_id, vec![tag_id]),
            None => state.note_tags.remove(&note_id),
        };
        Ok(())
    }

    async fn tags_for_task(&self, _token: &str, task_id: Uuid) -> Result<Vec<Tag>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let ids = state.task_tags.get(&task_id).cloned().unwrap_or_default();
        Ok(state
            .tags
            .iter()
            .filter(|tag| ids.contains(&tag.id))
            .cloned()
            .collect())
    }

    async fn set_task_tag(&self, _token: &str, task_id: Uuid, tag_id: Option<Uuid>) -> Result<()> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        match tag_id {
            Some(tag_id) => state.task_tags.insert(task_id, vec![tag_id]),
            None => state.task_tags.remove(&task_id),
        };
        Ok(())
    }
}

#[async_trait]
impl ShareStore for MockBackend {
    async fn shared_with_me(
        &self,
        _token: &str,
        email: &str,
        user_id: Uuid,
    ) -> Result<Vec<ShareWithNote>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut shares: Vec<ShareWithNote> = state
            .shares
            .values()
            .filter(|s| s.shared_with_email == email || s.shared_with_user_id == Some(user_id))
            .filter_map(|share| {
                state.notes.get(&share.note_id).map(|note| ShareWithNote {
                    share: share.clone(),
                    note: note.clone(),
                })
            })
            .collect();
        shares.sort_by(|a, b| b.share.created_at.cmp(&a.share.created_at));
        Ok(shares)
    }

    async fn shared_by_me(&self, _token: &str, owner_id: Uuid) -> Result<Vec<ShareWithNote>> {
        self.check_failure()?;
        let state = self.state.lock().unwrap();
        let mut shares: Vec<ShareWithNote> = state
            .shares
            .values()
            .filter(|s| s.owner_id == owner_id)
            .filter_map(|share| {
                state.notes.get(&share.note_id).map(|note| ShareWithNote {
                    share: share.clone(),
                    note: note.clone(),
                })
            })
            .collect();
        shares.sort_by(|a, b| b.share.created_at.cmp(&a.share.created_at));
        Ok(shares)
    }

    async fn create(
        &self,
        _token: &str,
        owner_id: Uuid,
        note_id: Uuid,
        email: &str,
        recipient_id: Option<Uuid>,
        can_edit: bool,
    ) -> Result<SharedNote> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();

        // The backend's unique constraint on (note_id, recipient)
        let already = state.shares.values().any(|s| {
            s.note_id == note_id
                && (s.shared_with_email == email
                    || (recipient_id.is_some() && s.shared_with_user_id == recipient_id))
        });
        if already {
            return Err(Error::Duplicate(
                "duplicate key value violates unique constraint".into(),
            ));
        }

        let share = SharedNote {
            id: Uuid::new_v4(),
            note_id,
            owner_id,
            shared_with_email: email.to_string(),
            shared_with_user_id: recipient_id,
            can_edit,
            created_at: Utc::now(),
        };
        state.shares.insert(share.id, share.clone());
        Ok(share)
    }

    async fn remove(&self, _token: &str, share_id: Uuid) -> Result<()> {
        self.check_failure()?;
        self.state.lock().unwrap().shares.remove(&share_id);
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MockBackend {
    async fn get(&self, _token: &str, user_id: Uuid) -> Result<Profile> {
        self.check_failure()?;
        self.state
            .lock()
            .unwrap()
            .profiles
            .get(&user_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Profile {user_id} not found")))
    }

    async fn find_by_email(&self, _token: &str, email: &str) -> Result<Option<Profile>> {
        self.check_failure()?;
        Ok(self
            .state
            .lock()
            .unwrap()
            .profiles
            .values()
            .find(|p| p.email == email)
            .cloned())
    }

    async fn search(&self, _token: &str, query: &str, exclude: Uuid) -> Result<Vec<Profile>> {
        self.check_failure()?;
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(self
            .state
            .lock()
            .unwrap()
            .profiles
            .values()
            .filter(|p| p.id != exclude)
            .filter(|p| {
                p.email.to_lowercase().contains(&needle)
                    || p.full_name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
            .take(10)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        _token: &str,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Profile> {
        self.check_failure()?;
        let mut state = self.state.lock().unwrap();
        let profile = state
            .profiles
            .get_mut(&user_id)
            .ok_or_else(|| Error::NotFound(format!("Profile {user_id} not found")))?;
        if let Some(full_name) = req.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(avatar_url) = req.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        profile.updated_at = Some(Utc::now());
        Ok(profile.clone())
    }
}

#[async_trait]
impl AuthProvider for MockBackend {
    async fn sign_up(&self, credentials: Credentials) -> Result<Session> {
        self.check_failure()?;
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(Error::InvalidInput("Email and password are required".into()));
        }
        {
            let state = self.state.lock().unwrap();
            if state.credentials.contains_key(&credentials.email) {
                return Err(Error::Duplicate("User already registered".into()));
            }
        }
        let user_id = self.seed_user(&credentials.email, &credentials.password);
        Ok(self.mint_session(AuthUser {
            id: user_id,
            email: credentials.email,
        }))
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<Session> {
        self.check_failure()?;
        let user = {
            let state = self.state.lock().unwrap();
            match state.credentials.get(&credentials.email) {
                Some((id, password)) if *password == credentials.password => AuthUser {
                    id: *id,
                    email: credentials.email.clone(),
                },
                _ => return Err(Error::Unauthorized("Invalid login credentials".into())),
            }
        };
        Ok(self.mint_session(user))
    }

    async fn sign_out(&self, token: &str) -> Result<()> {
        self.check_failure()?;
        self.state.lock().unwrap().sessions.remove(token);
        Ok(())
    }

    async fn resolve(&self, token: &str) -> Result<AuthUser> {
        self.check_failure()?;
        self.state
            .lock()
            .unwrap()
            .sessions
            .get(token)
            .cloned()
            .ok_or_else(|| Error::Unauthorized("Invalid or expired token".into()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session> {
        self.check_failure()?;
        let user = {
            let state = self.state.lock().unwrap();
            state
                .sessions
                .get(refresh_token)
                .cloned()
                .ok_or_else(|| Error::Unauthorized("Invalid refresh token".into()))?
        };
        Ok(self.mint_session(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_order_index_appends_and_keeps_gaps() {
        let backend = MockBackend::new();
        let user = backend.seed_user("a@example.com", "pw");
        let note = backend.seed_note(user, "Gallery");

        let first = NoteImageStore::add(&backend, "t", note.id, "https://cdn/1.jpg")
            .await
            .unwrap();
        let second = NoteImageStore::add(&backend, "t", note.id, "https://cdn/2.jpg")
            .await
            .unwrap();
        let third = NoteImageStore::add(&backend, "t", note.id, "https://cdn/3.jpg")
            .await
            .unwrap();
        assert_eq!((first.order_index, second.order_index, third.order_index), (0, 1, 2));

        // Deleting the middle image leaves a gap; the next insert goes past it
        NoteImageStore::remove(&backend, "t", second.id).await.unwrap();
        let fourth = NoteImageStore::add(&backend, "t", note.id, "https://cdn/4.jpg")
            .await
            .unwrap();
        assert_eq!(fourth.order_index, 3);

        let indices: Vec<i32> = NoteImageStore::list(&backend, "t", note.id)
            .await
            .unwrap()
            .iter()
            .map(|img| img.order_index)
            .collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_share_is_rejected() {
        let backend = MockBackend::new();
        let owner = backend.seed_user("owner@example.com", "pw");
        let note = backend.seed_note(owner, "Shared");

        ShareStore::create(&backend, "t", owner, note.id, "friend@example.com", None, true)
            .await
            .unwrap();
        let err =
            ShareStore::create(&backend, "t", owner, note.id, "friend@example.com", None, true)
                .await
                .unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_note_delete_cascades() {
        let backend = MockBackend::new();
        let user = backend.seed_user("a@example.com", "pw");
        let note = backend.seed_note(user, "Doomed");
        NoteImageStore::add(&backend, "t", note.id, "https://cdn/x.jpg")
            .await
            .unwrap();
        NoteChecklistStore::add(&backend, "t", note.id, "item")
            .await
            .unwrap();
        ShareStore::create(&backend, "t", user, note.id, "b@example.com", None, true)
            .await
            .unwrap();

        NoteStore::delete(&backend, "t", note.id).await.unwrap();

        assert!(NoteImageStore::list(&backend, "t", note.id)
            .await
            .unwrap()
            .is_empty());
        assert!(NoteChecklistStore::list(&backend, "t", note.id)
            .await
            .unwrap()
            .is_empty());
        assert!(ShareStore::shared_by_me(&backend, "t", user)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_and_resolve_round_trip() {
        let backend = MockBackend::new();
        backend.seed_user("ana@example.com", "hunter2");

        let session = backend
            .sign_in(Credentials {
                email: "ana@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        let user = backend.resolve(&session.access_token).await.unwrap();
        assert_eq!(user.email, "ana@example.com");

        backend.sign_out(&session.access_token).await.unwrap();
        assert!(backend.resolve(&session.access_token).await.is_err());
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let backend = MockBackend::new();
        backend.seed_user("ana@example.com", "hunter2");
        let err = backend
            .sign_in(Credentials {
                email: "ana@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
