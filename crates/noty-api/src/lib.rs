//! # noty-api
//!
//! HTTP API server for the noty backend: the image upload gateway plus
//! the JSON API the note/task/share views consume. All persistence and
//! authentication are delegated to the remote data backend, all image
//! storage to the image CDN; this crate is orchestration and boundary
//! enforcement only.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method, Response, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use noty_core::defaults;

pub use error::ApiError;
pub use state::AppState;

use handlers::{notes, profiles, sessions, shares, tags, tasks, upload};

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation and debugging.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// OpenAPI documentation served at `/docs`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noty API",
        description = "Notes, tasks, and sharing over a remote data backend, plus the image upload gateway"
    ),
    paths(
        handlers::upload::upload_image,
        handlers::sessions::sign_up,
        handlers::sessions::sign_in,
        handlers::notes::list_notes,
        handlers::notes::create_note,
        handlers::tasks::list_tasks,
        handlers::tags::list_tags,
        handlers::shares::list_shares,
        handlers::shares::create_share,
    ),
    components(schemas(
        noty_core::Note,
        noty_core::NoteImage,
        noty_core::NoteChecklistItem,
        noty_core::Task,
        noty_core::TaskChecklistItem,
        noty_core::TaskWithChecklist,
        noty_core::Tag,
        noty_core::SharedNote,
        noty_core::ShareWithNote,
        noty_core::Profile,
        noty_core::Session,
        noty_core::AuthUser,
        noty_core::Credentials,
        noty_core::CreateNoteRequest,
        noty_core::ShareNoteRequest,
        handlers::upload::UploadResponse,
        handlers::shares::ShareListResponse,
    )),
    tags(
        (name = "Upload", description = "Image upload gateway"),
        (name = "Auth", description = "Sessions"),
        (name = "Notes", description = "Note CRUD and sub-resources"),
        (name = "Tasks", description = "Task CRUD and sub-resources"),
        (name = "Tags", description = "Global tag catalog"),
        (name = "Shares", description = "Note sharing"),
    )
)]
struct ApiDoc;

/// Parse allowed CORS origins from a comma-separated list.
///
/// Empty input falls back to the local development origin. Origins are
/// whitelisted explicitly; there is no wildcard mode.
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    if origins.trim().is_empty() {
        return vec![HeaderValue::from_static("http://localhost:3000")];
    }

    origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Panic guard: the browser parses every response body as JSON, so even a
/// handler bug must come back as the error envelope, never a stack trace.
fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response<Body> {
    tracing::error!("Handler panicked");
    let body = serde_json::json!({ "error": "Internal server error" }).to_string();
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("static response must build")
}

/// Build the application router.
pub fn app(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    // Everything that needs a resolved session
    let protected = Router::new()
        .route("/api/v1/auth/logout", post(sessions::sign_out))
        .route("/api/v1/auth/me", get(sessions::current_user))
        // Notes and sub-resources
        .route("/api/v1/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/api/v1/notes/:id",
            get(notes::get_note)
                .patch(notes::update_note)
                .delete(notes::delete_note),
        )
        .route(
            "/api/v1/notes/:id/images",
            get(notes::list_note_images).post(notes::add_note_image),
        )
        .route(
            "/api/v1/notes/:id/images/:image_id",
            axum::routing::delete(notes::delete_note_image),
        )
        .route(
            "/api/v1/notes/:id/checklist",
            get(notes::list_note_checklist).post(notes::add_note_checklist_item),
        )
        .route(
            "/api/v1/notes/:id/checklist/:item_id",
            axum::routing::patch(notes::set_note_checklist_item)
                .delete(notes::delete_note_checklist_item),
        )
        .route(
            "/api/v1/notes/:id/tags",
            get(notes::get_note_tags).put(notes::set_note_tags),
        )
        // Tasks and sub-resources
        .route("/api/v1/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/v1/tasks/:id",
            get(tasks::get_task)
                .patch(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/api/v1/tasks/:id/checklist",
            get(tasks::list_task_checklist).post(tasks::add_task_checklist_item),
        )
        .route(
            "/api/v1/tasks/:id/checklist/:item_id",
            axum::routing::patch(tasks::set_task_checklist_item)
                .delete(tasks::delete_task_checklist_item),
        )
        .route(
            "/api/v1/tasks/:id/tags",
            get(tasks::get_task_tags).put(tasks::set_task_tags),
        )
        // Tag catalog
        .route("/api/v1/tags", get(tags::list_tags))
        // Sharing
        .route(
            "/api/v1/shares",
            get(shares::list_shares).post(shares::create_share),
        )
        .route("/api/v1/shares/:id", axum::routing::delete(shares::delete_share))
        .route("/api/v1/shares/notes", post(shares::create_shared_note))
        // Profiles
        .route(
            "/api/v1/profile",
            get(profiles::get_profile).patch(profiles::update_profile),
        )
        .route("/api/v1/profiles/search", get(shares::search_profiles))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // The upload gateway carries no session requirement
        .route("/api/upload", post(upload::upload_image))
        // Session endpoints that mint tokens
        .route("/api/v1/auth/signup", post(sessions::sign_up))
        .route("/api/v1/auth/login", post(sessions::sign_in))
        .route("/api/v1/auth/refresh", post(sessions::refresh_session))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), auth::rate_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(DefaultBodyLimit::max(defaults::MAX_REQUEST_BODY_BYTES))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_allowed_origins_parsing() {
        let origins = parse_allowed_origins("https://noty.example");
        assert_eq!(origins.len(), 1);
        assert_eq!(origins[0].to_str().unwrap(), "https://noty.example");

        let origins = parse_allowed_origins("https://noty.example,http://localhost:3000");
        assert_eq!(origins.len(), 2);

        let origins =
            parse_allowed_origins("https://noty.example, http://localhost:3000 , https://a.b");
        assert_eq!(origins.len(), 3);
    }

    #[test]
    fn test_cors_empty_input_uses_default() {
        let origins = parse_allowed_origins("");
        assert!(!origins.is_empty());
    }

    #[test]
    fn test_cors_invalid_origins_are_filtered() {
        let origins = parse_allowed_origins("https://valid.example,not a url\u{0},http://localhost:3000");
        assert_eq!(origins.len(), 2);
    }
}
