//! Task API tests: creation with initial checklist, progress data,
//! tagging, and deletion cascades.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{backend_with_session, request_json, router, sample_tags};

const TOKEN: &str = "session-token";

#[tokio::test]
async fn create_with_initial_checklist() {
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let app = router(backend, None);

    let (status, task) = request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({
            "title": "Pack for the trip",
            "description": "weekend hike",
            "checklist": ["boots", "tent", ""],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["completed"], false);

    // Blank rows are skipped; the rest keep submission order
    let (_status, items) = request_json(
        &app,
        "GET",
        &format!("/api/v1/tasks/{}/checklist", task["id"].as_str().unwrap()),
        Some(TOKEN),
        None,
    )
    .await;
    let items = items.as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "boots");
    assert_eq!(items[1]["title"], "tent");
    assert_eq!(items[1]["order_index"], 1);
}

#[tokio::test]
async fn list_embeds_checklists() {
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let app = router(backend, None);

    request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": "With items", "checklist": ["one", "two"]})),
    )
    .await;
    request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": "Without items"})),
    )
    .await;

    let (status, listed) = request_json(&app, "GET", "/api/v1/tasks", Some(TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = listed.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    for task in tasks {
        assert!(task["checklist_items"].is_array());
    }
}

#[tokio::test]
async fn create_with_tag_assigns_it() {
    let tags = sample_tags();
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let backend = backend.with_tags(tags.clone());
    let app = router(backend, None);

    let (_status, task) = request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": "Tagged", "tag_id": tags[0].id})),
    )
    .await;

    let (_status, assigned) = request_json(
        &app,
        "GET",
        &format!("/api/v1/tasks/{}/tags", task["id"].as_str().unwrap()),
        Some(TOKEN),
        None,
    )
    .await;
    let assigned = assigned.as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["name"], tags[0].name);
}

#[tokio::test]
async fn toggling_completion() {
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let app = router(backend, None);

    let (_status, task) = request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": "Flip me"})),
    )
    .await;
    let id = task["id"].as_str().unwrap().to_string();

    let (status, updated) = request_json(
        &app,
        "PATCH",
        &format!("/api/v1/tasks/{id}"),
        Some(TOKEN),
        Some(json!({"completed": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
}

#[tokio::test]
async fn delete_removes_checklist_too() {
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let app = router(backend, None);

    let (_status, task) = request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": "Doomed", "checklist": ["a", "b"]})),
    )
    .await;
    let id = task["id"].as_str().unwrap().to_string();

    let (status, _body) = request_json(
        &app,
        "DELETE",
        &format!("/api/v1/tasks/{id}"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = request_json(
        &app,
        "GET",
        &format!("/api/v1/tasks/{id}"),
        Some(TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn task_title_is_required() {
    let (backend, _user) = backend_with_session("ana@example.com", TOKEN);
    let app = router(backend, None);

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/v1/tasks",
        Some(TOKEN),
        Some(json!({"title": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title is required");
}
