//! Contract tests for the media client against a stubbed provider.
//!
//! Verifies the full request/response behavior of the upload path: the
//! form fields sent, URL extraction on success, structured-then-raw error
//! reduction on failure, and the missing-URL edge case.

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use noty_core::{Error, ImageStore};
use noty_media::{MediaClient, MediaConfig};

fn client(api_base: &str) -> MediaClient {
    MediaClient::new(MediaConfig {
        cloud_name: "demo".into(),
        api_key: "key123".into(),
        api_secret: "secret456".into(),
        folder: "noty-app".into(),
        timeout_secs: 5,
    })
    .unwrap()
    .with_api_base(api_base)
}

#[tokio::test]
async fn upload_returns_secure_url_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .and(body_string_contains("api_key=key123"))
        .and(body_string_contains("folder=noty-app"))
        .and(body_string_contains("signature="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "noty-app/abc123",
            "secure_url": "https://res.cdn.test/noty-app/abc123.jpg",
        })))
        .mount(&server)
        .await;

    let url = client(&server.uri())
        .upload(b"fake image bytes", "image/jpeg")
        .await
        .unwrap();

    assert_eq!(url, "https://res.cdn.test/noty-app/abc123.jpg");
}

#[tokio::test]
async fn upload_sends_file_as_base64_data_uri() {
    let server = MockServer::start().await;
    // "file=data%3Aimage%2Fpng%3Bbase64%2C" is the urlencoded prefix of
    // a PNG data URI
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .and(body_string_contains("file=data%3Aimage%2Fpng%3Bbase64%2C"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://res.cdn.test/noty-app/x.png",
        })))
        .mount(&server)
        .await;

    let result = client(&server.uri()).upload(b"png bytes", "image/png").await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn provider_rejection_surfaces_structured_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": {"message": "Invalid signature"}})),
        )
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .upload(b"bytes", "image/jpeg")
        .await
        .unwrap_err();

    match err {
        Error::Remote { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid signature");
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_rejection_falls_back_to_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .upload(b"bytes", "image/jpeg")
        .await
        .unwrap_err();

    match err {
        Error::Remote { message, .. } => assert!(message.contains("Bad Gateway")),
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_secure_url_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": "noty-app/orphan",
        })))
        .mount(&server)
        .await;

    let err = client(&server.uri())
        .upload(b"bytes", "image/jpeg")
        .await
        .unwrap_err();

    match err {
        Error::Remote { message, .. } => {
            assert_eq!(message, "No URL returned from image provider")
        }
        other => panic!("Expected Remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_posts_signed_destroy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1_1/demo/image/destroy"))
        .and(body_string_contains("public_id=noty-app%2Fabc123"))
        .and(body_string_contains("signature="))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
        .mount(&server)
        .await;

    client(&server.uri()).delete("noty-app/abc123").await.unwrap();
}
