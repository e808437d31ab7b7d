//! Auth middleware tests: one authoritative token resolution per
//! request, JSON envelopes on every rejection.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{backend_with_session, request_json, router};
use noty_data::MockBackend;

#[tokio::test]
async fn missing_token_is_401_with_envelope() {
    let app = router(MockBackend::new(), None);
    let (status, body) = request_json(&app, "GET", "/api/v1/notes", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing bearer token");
}

#[tokio::test]
async fn unknown_token_is_401() {
    let app = router(MockBackend::new(), None);
    let (status, body) =
        request_json(&app, "GET", "/api/v1/notes", Some("not-a-session"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired session");
}

#[tokio::test]
async fn health_needs_no_session() {
    let app = router(MockBackend::new(), None);
    let (status, body) = request_json(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn signup_then_login_then_me() {
    let app = router(MockBackend::new(), None);

    let credentials = json!({"email": "ana@example.com", "password": "hunter2"});
    let (status, _session) = request_json(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) =
        request_json(&app, "POST", "/api/v1/auth/login", None, Some(credentials)).await;
    assert_eq!(status, StatusCode::OK);
    let token = session["access_token"].as_str().unwrap();
    assert!(!token.is_empty());

    let (status, me) = request_json(&app, "GET", "/api/v1/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ana@example.com");
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = router(MockBackend::new(), None);
    let credentials = json!({"email": "ana@example.com", "password": "hunter2"});

    request_json(&app, "POST", "/api/v1/auth/signup", None, Some(credentials.clone())).await;
    let (status, body) =
        request_json(&app, "POST", "/api/v1/auth/signup", None, Some(credentials)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(!body["error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = router(MockBackend::new(), None);
    request_json(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({"email": "ana@example.com", "password": "hunter2"})),
    )
    .await;

    let (status, _body) = request_json(
        &app,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({"email": "ana@example.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let (backend, _user) = backend_with_session("ana@example.com", "tok");
    let app = router(backend, None);

    let (status, _body) =
        request_json(&app, "POST", "/api/v1/auth/logout", Some("tok"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _body) = request_json(&app, "GET", "/api/v1/auth/me", Some("tok"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_mints_a_new_session() {
    let app = router(MockBackend::new(), None);
    let (_status, session) = request_json(
        &app,
        "POST",
        "/api/v1/auth/signup",
        None,
        Some(json!({"email": "ana@example.com", "password": "hunter2"})),
    )
    .await;

    let (status, refreshed) = request_json(
        &app,
        "POST",
        "/api/v1/auth/refresh",
        None,
        Some(json!({"refresh_token": session["refresh_token"]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(refreshed["access_token"], session["access_token"]);
}
