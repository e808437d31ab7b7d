//! Note repository.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use noty_core::{CreateNoteRequest, Error, Note, NoteStore, Result, UpdateNoteRequest};

use crate::client::{eq, first_row, DataBackend};

const TABLE: &str = "notes";

/// Data-backend implementation of [`NoteStore`].
#[derive(Clone)]
pub struct RestNoteStore {
    backend: DataBackend,
}

impl RestNoteStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl NoteStore for RestNoteStore {
    async fn list(&self, token: &str, user_id: Uuid) -> Result<Vec<Note>> {
        self.backend
            .select(
                token,
                TABLE,
                &[
                    ("select", "*".into()),
                    ("user_id", eq(user_id)),
                    ("order", "updated_at.desc".into()),
                ],
            )
            .await
    }

    async fn get(&self, token: &str, id: Uuid) -> Result<Note> {
        self.backend
            .select_one(token, TABLE, &[("select", "*".into()), ("id", eq(id))])
            .await
    }

    async fn create(&self, token: &str, user_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput("Title is required".into()));
        }

        let rows = self
            .backend
            .insert(
                token,
                TABLE,
                json!({
                    "title": req.title,
                    "content": req.content,
                    "cover_image_url": req.cover_image_url,
                    "user_id": user_id,
                }),
            )
            .await?;
        first_row(rows, "note")
    }

    async fn update(&self, token: &str, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        let mut body = serde_json::Map::new();
        if let Some(title) = req.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Title is required".into()));
            }
            body.insert("title".into(), title.into());
        }
        if let Some(content) = req.content {
            body.insert("content".into(), content.into());
        }
        if let Some(cover) = req.cover_image_url {
            body.insert(
                "cover_image_url".into(),
                cover.map(Into::into).unwrap_or(serde_json::Value::Null),
            );
        }

        // Nothing to change: hand back the current row
        if body.is_empty() {
            return self.get(token, id).await;
        }

        let rows = self
            .backend
            .update(token, TABLE, &[("id", eq(id))], body.into())
            .await?;
        first_row(rows, "note").map_err(|_| Error::NotFound(format!("Note {id} not found")))
    }

    async fn delete(&self, token: &str, id: Uuid) -> Result<()> {
        self.backend.delete(token, TABLE, &[("id", eq(id))]).await
    }
}
