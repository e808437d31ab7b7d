//! Tag catalog and tag-assignment repository.
//!
//! The catalog is global and read-only from the application's point of
//! view. Assignments are stored many-to-many (`note_tags`/`task_tags`);
//! the single-tag rule is enforced above this layer in
//! `noty_core::tag_rule`, and the `set_*` operations here have replace
//! semantics: drop the existing join rows, insert the one new row.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use noty_core::{Result, Tag, TagStore};

use crate::client::{eq, DataBackend};

/// Join row with the embedded tag, as the backend returns it.
#[derive(Debug, Deserialize)]
struct TagJoinRow {
    tag: Tag,
}

/// Data-backend implementation of [`TagStore`].
#[derive(Clone)]
pub struct RestTagStore {
    backend: DataBackend,
}

impl RestTagStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }

    async fn tags_for(&self, token: &str, join_table: &str, fk: &str, id: Uuid) -> Result<Vec<Tag>> {
        let rows: Vec<TagJoinRow> = self
            .backend
            .select(
                token,
                join_table,
                &[
                    ("select", "tag:tags(id,name,icon,color)".into()),
                    (fk, eq(id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.tag).collect())
    }

    async fn set_tag(
        &self,
        token: &str,
        join_table: &str,
        fk: &'static str,
        id: Uuid,
        tag_id: Option<Uuid>,
    ) -> Result<()> {
        // Replace semantics: clear, then insert the one assignment
        self.backend.delete(token, join_table, &[(fk, eq(id))]).await?;

        if let Some(tag_id) = tag_id {
            let mut row = serde_json::Map::new();
            row.insert(fk.to_string(), serde_json::to_value(id)?);
            row.insert("tag_id".to_string(), serde_json::to_value(tag_id)?);
            let _rows: Vec<serde_json::Value> =
                self.backend.insert(token, join_table, row.into()).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl TagStore for RestTagStore {
    async fn list(&self, token: &str) -> Result<Vec<Tag>> {
        self.backend
            .select(
                token,
                "tags",
                &[("select", "*".into()), ("order", "name.asc".into())],
            )
            .await
    }

    async fn tags_for_note(&self, token: &str, note_id: Uuid) -> Result<Vec<Tag>> {
        self.tags_for(token, "note_tags", "note_id", note_id).await
    }

    async fn set_note_tag(&self, token: &str, note_id: Uuid, tag_id: Option<Uuid>) -> Result<()> {
        self.set_tag(token, "note_tags", "note_id", note_id, tag_id)
            .await
    }

    async fn tags_for_task(&self, token: &str, task_id: Uuid) -> Result<Vec<Tag>> {
        self.tags_for(token, "task_tags", "task_id", task_id).await
    }

    async fn set_task_tag(&self, token: &str, task_id: Uuid, tag_id: Option<Uuid>) -> Result<()> {
        self.set_tag(token, "task_tags", "task_id", task_id, tag_id)
            .await
    }
}
