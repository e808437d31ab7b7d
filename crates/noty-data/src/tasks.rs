//! Standalone task repository.
//!
//! Tasks live in `user_tasks`; their checklist rows in
//! `task_checklist_items`. The list view embeds the checklist in a single
//! query so progress can be computed without a second round trip.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use noty_core::{
    CreateTaskRequest, Error, Result, Task, TaskChecklistItem, TaskChecklistStore, TaskStore,
    TaskWithChecklist, UpdateTaskRequest,
};

use crate::client::{eq, first_row, DataBackend};
use crate::note_images::next_order_index;

const TASKS: &str = "user_tasks";
const CHECKLIST: &str = "task_checklist_items";

/// Embedded select for a task plus its checklist.
const TASK_WITH_CHECKLIST: &str =
    "*,checklist_items:task_checklist_items(id,task_id,title,completed,order_index,created_at)";

/// Data-backend implementation of [`TaskStore`].
#[derive(Clone)]
pub struct RestTaskStore {
    backend: DataBackend,
}

impl RestTaskStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl TaskStore for RestTaskStore {
    async fn list(&self, token: &str, user_id: Uuid) -> Result<Vec<TaskWithChecklist>> {
        self.backend
            .select(
                token,
                TASKS,
                &[
                    ("select", TASK_WITH_CHECKLIST.into()),
                    ("user_id", eq(user_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await
    }

    async fn get(&self, token: &str, id: Uuid) -> Result<Task> {
        self.backend
            .select_one(token, TASKS, &[("select", "*".into()), ("id", eq(id))])
            .await
    }

    async fn create(&self, token: &str, user_id: Uuid, req: CreateTaskRequest) -> Result<Task> {
        if req.title.trim().is_empty() {
            return Err(Error::InvalidInput("Title is required".into()));
        }

        let rows = self
            .backend
            .insert(
                token,
                TASKS,
                json!({
                    "title": req.title,
                    "description": req.description,
                    "user_id": user_id,
                    "completed": false,
                    "order_index": 0,
                }),
            )
            .await?;
        let task: Task = first_row(rows, "task")?;

        // Initial checklist rows keep their submission order
        let items: Vec<_> = req
            .checklist
            .iter()
            .filter(|title| !title.trim().is_empty())
            .enumerate()
            .map(|(index, title)| {
                json!({
                    "task_id": task.id,
                    "title": title,
                    "completed": false,
                    "order_index": index as i32,
                })
            })
            .collect();
        if !items.is_empty() {
            let _rows: Vec<TaskChecklistItem> = self
                .backend
                .insert(token, CHECKLIST, serde_json::Value::Array(items))
                .await?;
        }

        Ok(task)
    }

    async fn update(&self, token: &str, id: Uuid, req: UpdateTaskRequest) -> Result<Task> {
        let mut body = serde_json::Map::new();
        if let Some(title) = req.title {
            if title.trim().is_empty() {
                return Err(Error::InvalidInput("Title is required".into()));
            }
            body.insert("title".into(), title.into());
        }
        if let Some(description) = req.description {
            body.insert("description".into(), description.into());
        }
        if let Some(completed) = req.completed {
            body.insert("completed".into(), completed.into());
        }

        if body.is_empty() {
            return self.get(token, id).await;
        }

        let rows = self
            .backend
            .update(token, TASKS, &[("id", eq(id))], body.into())
            .await?;
        first_row(rows, "task").map_err(|_| Error::NotFound(format!("Task {id} not found")))
    }

    async fn delete(&self, token: &str, id: Uuid) -> Result<()> {
        self.backend.delete(token, TASKS, &[("id", eq(id))]).await
    }
}

/// Data-backend implementation of [`TaskChecklistStore`].
#[derive(Clone)]
pub struct RestTaskChecklistStore {
    backend: DataBackend,
}

impl RestTaskChecklistStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl TaskChecklistStore for RestTaskChecklistStore {
    async fn list(&self, token: &str, task_id: Uuid) -> Result<Vec<TaskChecklistItem>> {
        self.backend
            .select(
                token,
                CHECKLIST,
                &[
                    ("select", "*".into()),
                    ("task_id", eq(task_id)),
                    ("order", "order_index.asc".into()),
                ],
            )
            .await
    }

    async fn add(&self, token: &str, task_id: Uuid, title: &str) -> Result<TaskChecklistItem> {
        let existing = self.list(token, task_id).await?;
        let order_index = next_order_index(existing.iter().map(|item| item.order_index));

        let rows = self
            .backend
            .insert(
                token,
                CHECKLIST,
                json!({
                    "task_id": task_id,
                    "title": title,
                    "completed": false,
                    "order_index": order_index,
                }),
            )
            .await?;
        first_row(rows, "checklist item")
    }

    async fn set_completed(&self, token: &str, item_id: Uuid, completed: bool) -> Result<()> {
        let _rows: Vec<TaskChecklistItem> = self
            .backend
            .update(
                token,
                CHECKLIST,
                &[("id", eq(item_id))],
                json!({ "completed": completed }),
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, token: &str, item_id: Uuid) -> Result<()> {
        self.backend
            .delete(token, CHECKLIST, &[("id", eq(item_id))])
            .await
    }
}
