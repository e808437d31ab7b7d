//! Upload gateway boundary-contract tests.
//!
//! Every response must be the fixed JSON envelope: `{"url"}` on success,
//! `{"error"}` otherwise. Never HTML, never an empty body. Validation
//! failures are 400, configuration and provider failures are 500, and no
//! provider call happens unless every precondition passed.

mod common;

use axum::http::StatusCode;

use common::{router, upload};
use noty_data::MockBackend;
use noty_media::MockImageStore;

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let app = router(MockBackend::new(), Some(MockImageStore::new()));
    let (status, body) = upload(&app, "attachment", "photo.jpg", "image/jpeg", b"bytes").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn empty_file_is_rejected() {
    let app = router(MockBackend::new(), Some(MockImageStore::new()));
    let (status, body) = upload(&app, "file", "photo.jpg", "image/jpeg", b"").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn non_image_media_type_is_rejected() {
    let media = MockImageStore::new();
    let app = router(MockBackend::new(), Some(media.clone()));
    let (status, body) = upload(&app, "file", "notes.txt", "text/plain", b"just text").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("must be an image"));
    assert_eq!(media.upload_count(), 0);
}

#[tokio::test]
async fn renamed_text_file_with_image_name_is_still_rejected() {
    // The declared media type decides, not the filename
    let app = router(MockBackend::new(), Some(MockImageStore::new()));
    let (status, _body) = upload(&app, "file", "sneaky.jpg", "text/plain", b"not an image").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_file_is_rejected() {
    let media = MockImageStore::new();
    let app = router(MockBackend::new(), Some(media.clone()));
    let oversized = vec![0u8; 10 * 1024 * 1024 + 1];
    let (status, body) = upload(&app, "file", "big.png", "image/png", &oversized).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "File size must be less than 10MB");
    assert_eq!(media.upload_count(), 0);
}

#[tokio::test]
async fn file_at_exactly_the_limit_is_accepted() {
    let app = router(MockBackend::new(), Some(MockImageStore::new()));
    let at_limit = vec![0u8; 10 * 1024 * 1024];
    let (status, body) = upload(&app, "file", "max.png", "image/png", &at_limit).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn missing_provider_configuration_is_a_server_error() {
    let app = router(MockBackend::new(), None);
    let (status, body) = upload(&app, "file", "photo.jpg", "image/jpeg", b"bytes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("configuration is missing"));
}

#[tokio::test]
async fn configuration_is_checked_before_request_validation() {
    // Even an invalid request answers 500 when the provider is
    // unconfigured; nothing downstream of the config check runs
    let app = router(MockBackend::new(), None);
    let (status, _body) = upload(&app, "wrong-field", "x.txt", "text/plain", b"").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn valid_image_returns_https_url() {
    let media = MockImageStore::new();
    let app = router(MockBackend::new(), Some(media.clone()));
    let two_megabytes = vec![0xAB; 2 * 1024 * 1024];
    let (status, body) = upload(&app, "file", "photo.jpg", "image/jpeg", &two_megabytes).await;

    assert_eq!(status, StatusCode::OK);
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("https://"));
    assert_eq!(media.upload_count(), 1);
    assert_eq!(media.uploads()[0].content_type, "image/jpeg");
}

#[tokio::test]
async fn provider_rejection_is_json_with_the_extracted_message() {
    let media = MockImageStore::new().with_failure("Invalid signature");
    let app = router(MockBackend::new(), Some(media));
    let (status, body) = upload(&app, "file", "photo.jpg", "image/jpeg", b"bytes").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Invalid signature");
}

#[tokio::test]
async fn non_multipart_request_still_gets_the_json_envelope() {
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    let app = router(MockBackend::new(), Some(MockImageStore::new()));
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let (status, body) = common::into_json(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn identical_uploads_store_two_distinct_assets() {
    // Idempotence is explicitly not guaranteed
    let media = MockImageStore::new();
    let app = router(MockBackend::new(), Some(media.clone()));

    let (_s1, first) = upload(&app, "file", "same.jpg", "image/jpeg", b"same bytes").await;
    let (_s2, second) = upload(&app, "file", "same.jpg", "image/jpeg", b"same bytes").await;

    assert_ne!(first["url"], second["url"]);
    assert_eq!(media.upload_count(), 2);
}
