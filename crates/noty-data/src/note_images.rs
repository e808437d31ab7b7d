//! Note gallery image repository.
//!
//! `order_index` is assigned as `max(existing) + 1` on insert and is never
//! re-compacted on delete. Gaps are expected; only relative order carries
//! meaning.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use noty_core::{NoteImage, NoteImageStore, Result};

use crate::client::{eq, first_row, DataBackend};

const TABLE: &str = "note_images";

/// Data-backend implementation of [`NoteImageStore`].
#[derive(Clone)]
pub struct RestNoteImageStore {
    backend: DataBackend,
}

impl RestNoteImageStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

/// Next ordering index: one past the current maximum, 0 when empty.
pub(crate) fn next_order_index(existing: impl Iterator<Item = i32>) -> i32 {
    existing.max().map_or(0, |max| max + 1)
}

#[async_trait]
impl NoteImageStore for RestNoteImageStore {
    async fn list(&self, token: &str, note_id: Uuid) -> Result<Vec<NoteImage>> {
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

    async fn add(&self, token: &str, note_id: Uuid, image_url: &str) -> Result<NoteImage> {
        let existing = self.list(token, note_id).await?;
        let order_index = next_order_index(existing.iter().map(|img| img.order_index));

        let rows = self
            .backend
            .insert(
                token,
                TABLE,
                json!({
                    "note_id": note_id,
                    "image_url": image_url,
                    "order_index": order_index,
                }),
            )
            .await?;
        first_row(rows, "note image")
    }

    async fn remove(&self, token: &str, image_id: Uuid) -> Result<()> {
        self.backend
            .delete(token, TABLE, &[("id", eq(image_id))])
            .await
    }
}
