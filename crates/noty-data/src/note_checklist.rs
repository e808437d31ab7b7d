//! Note checklist repository.
//!
//! Checklist rows scoped to a note live in the backend's `tasks` table
//! (distinct from `user_tasks`, the standalone task list). Same ordering
//! rule as the image gallery: append at `max + 1`, never re-compact.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use noty_core::{NoteChecklistItem, NoteChecklistStore, Result};

use crate::client::{eq, first_row, DataBackend};
use crate::note_images::next_order_index;

const TABLE: &str = "tasks";

/// Data-backend implementation of [`NoteChecklistStore`].
#[derive(Clone)]
pub struct RestNoteChecklistStore {
    backend: DataBackend,
}

impl RestNoteChecklistStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl NoteChecklistStore for RestNoteChecklistStore {
    async fn list(&self, token: &str, note_id: Uuid) -> Result<Vec<NoteChecklistItem>> {
        self.backend
            .select(
                token,
                TABLE,
                &[
                    ("select", "*".into()),
                    ("note_id", eq(note_id)),
                    ("order", "order_index.asc".into()),
                ],
            )
            .await
    }

    async fn add(&self, token: &str, note_id: Uuid, title: &str) -> Result<NoteChecklistItem> {
        let existing = self.list(token, note_id).await?;
        let order_index = next_order_index(existing.iter().map(|item| item.order_index));

        let rows = self
            .backend
            .insert(
                token,
                TABLE,
                json!({
                    "note_id": note_id,
                    "title": title,
                    "completed": false,
                    "order_index": order_index,
                }),
            )
            .await?;
        first_row(rows, "checklist item")
    }

    async fn set_completed(&self, token: &str, item_id: Uuid, completed: bool) -> Result<()> {
        let _rows: Vec<NoteChecklistItem> = self
            .backend
            .update(
                token,
                TABLE,
                &[("id", eq(item_id))],
                json!({ "completed": completed }),
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, token: &str, item_id: Uuid) -> Result<()> {
        self.backend
            .delete(token, TABLE, &[("id", eq(item_id))])
            .await
    }
}
