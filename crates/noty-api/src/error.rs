//! API error envelope.
//!
//! Every failure leaving this server is a JSON body of the shape
//! `{"error": "<message>"}` with a matching status code. Browser callers
//! parse the body unconditionally, so nothing may escape as HTML or a raw
//! panic message.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::error;

/// API-level error, mapped onto the HTTP status space.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    TooManyRequests,
    Internal(String),
}

impl From<noty_core::Error> for ApiError {
    fn from(err: noty_core::Error) -> Self {
        use noty_core::Error;
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Duplicate(msg) => ApiError::Conflict(msg),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::Remote { message, .. } => ApiError::Internal(message),
            Error::Request(msg) => ApiError::Internal(msg),
            Error::Serialization(msg) => ApiError::Internal(msg),
            Error::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::TooManyRequests => {
                (StatusCode::TOO_MANY_REQUESTS, "Too many requests".to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            error!(status = %status, %message, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noty_core::Error;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api: ApiError = Error::InvalidInput("title".into()).into();
        assert!(matches!(api, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let api: ApiError = Error::Duplicate("dup".into()).into();
        assert!(matches!(api, ApiError::Conflict(_)));
    }

    #[test]
    fn test_remote_failure_maps_to_internal_with_message() {
        let api: ApiError = Error::Remote {
            status: 502,
            message: "Invalid signature".into(),
        }
        .into();
        match api {
            ApiError::Internal(msg) => assert_eq!(msg, "Invalid signature"),
            other => panic!("Expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_unauthorized_passes_through() {
        let api: ApiError = Error::Unauthorized("expired".into()).into();
        assert!(matches!(api, ApiError::Unauthorized(_)));
    }
}
