//! Shared test harness: a router over the in-memory mock backend.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use noty_api::{app, parse_allowed_origins, AppState};
use noty_core::Tag;
use noty_data::MockBackend;
use noty_media::MockImageStore;

/// Build a router around the given mocks. `media: None` models missing
/// provider configuration.
pub fn router(backend: MockBackend, media: Option<MockImageStore>) -> Router {
    let backend = Arc::new(backend);
    let state = AppState {
        notes: backend.clone(),
        note_images: backend.clone(),
        note_checklist: backend.clone(),
        tasks: backend.clone(),
        task_checklist: backend.clone(),
        tags: backend.clone(),
        shares: backend.clone(),
        profiles: backend.clone(),
        auth: backend,
        media: media.map(|m| Arc::new(m) as _),
        rate_limiter: None,
    };
    app(state, parse_allowed_origins(""))
}

/// A backend with one registered user and a fixed session token.
pub fn backend_with_session(email: &str, token: &str) -> (MockBackend, Uuid) {
    let backend = MockBackend::new();
    let user_id = backend.seed_user(email, "password");
    backend.seed_session(token, user_id);
    (backend, user_id)
}

/// A small tag catalog for tag-rule tests.
pub fn sample_tags() -> Vec<Tag> {
    vec![
        Tag {
            id: Uuid::new_v4(),
            name: "Code".into(),
            icon: "Code".into(),
            color: "blue".into(),
        },
        Tag {
            id: Uuid::new_v4(),
            name: "Home".into(),
            icon: "Home".into(),
            color: "green".into(),
        },
    ]
}

/// One-shot JSON request.
pub async fn request_json(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    into_json(response).await
}

/// Collect a response into (status, parsed JSON body).
pub async fn into_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| panic!("Non-JSON response body: {:?}", String::from_utf8_lossy(&bytes)));
    (status, json)
}

/// Build a multipart request body with one field.
pub fn multipart_body(
    field_name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> (String, Vec<u8>) {
    let boundary = "noty-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
             filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}

/// POST a multipart upload to `/api/upload`.
pub async fn upload(
    router: &Router,
    field_name: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> (StatusCode, serde_json::Value) {
    let (header_value, body) = multipart_body(field_name, filename, content_type, bytes);
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, header_value)
        .body(Body::from(body))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    into_json(response).await
}
