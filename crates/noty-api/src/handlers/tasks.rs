//! Task handlers: CRUD plus checklist and tag sub-resources.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use uuid::Uuid;

use noty_core::{
    tag_rule, CreateTaskRequest, Tag, Task, TaskChecklistItem, TaskWithChecklist,
    UpdateTaskRequest,
};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::handlers::notes::{AddChecklistItemRequest, SetCompletedRequest, SetTagsRequest};
use crate::state::AppState;

/// List the caller's tasks with their checklists, newest first.
#[utoipa::path(get, path = "/api/v1/tasks", tag = "Tasks",
    responses((status = 200, description = "The caller's tasks", body = [TaskWithChecklist])))]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<TaskWithChecklist>>, ApiError> {
    let tasks = state.tasks.list(&user.token, user.id).await?;
    Ok(Json(tasks))
}

/// Create a task, optionally with initial checklist rows and a tag.
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Title is required".into()));
    }

    let tag_id = req.tag_id;
    let task = state.tasks.create(&user.token, user.id, req).await?;

    if let Some(tag_id) = tag_id {
        state
            .tags
            .set_task_tag(&user.token, task.id, Some(tag_id))
            .await?;
    }

    Ok(Json(task))
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state.tasks.get(&user.token, id).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state.tasks.update(&user.token, id, req).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.tasks.delete(&user.token, id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// =============================================================================
// CHECKLIST
// =============================================================================

pub async fn list_task_checklist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Vec<TaskChecklistItem>>, ApiError> {
    let items = state.task_checklist.list(&user.token, task_id).await?;
    Ok(Json(items))
}

pub async fn add_task_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AddChecklistItemRequest>,
) -> Result<Json<TaskChecklistItem>, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Item title is required".into()));
    }
    let item = state
        .task_checklist
        .add(&user.token, task_id, &req.title)
        .await?;
    Ok(Json(item))
}

pub async fn set_task_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((_task_id, item_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<SetCompletedRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .task_checklist
        .set_completed(&user.token, item_id, req.completed)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

pub async fn delete_task_checklist_item(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((_task_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.task_checklist.remove(&user.token, item_id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

// =============================================================================
// TAGS
// =============================================================================

pub async fn get_task_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = state.tags.tags_for_task(&user.token, task_id).await?;
    Ok(Json(tags))
}

/// Replace the task's tag assignment (single-tag rule applies).
pub async fn set_task_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<SetTagsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let tag_id = tag_rule::validate_selection(&req.tag_ids)?;
    state
        .tags
        .set_task_tag(&user.token, task_id, tag_id)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
