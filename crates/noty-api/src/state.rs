//! Application state.
//!
//! Every collaborator is injected as a trait object at construction time;
//! handlers never reach into the environment. The media store is `None`
//! when the provider secrets were absent at startup; the upload gateway
//! then fails fast with its configuration error and performs no network
//! call.

use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::RateLimiter;

use noty_core::{
    AuthProvider, ImageStore, NoteChecklistStore, NoteImageStore, NoteStore, ProfileStore,
    ShareStore, TagStore, TaskChecklistStore, TaskStore,
};

/// Global rate limiter type (direct quota, no keyed bucketing).
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteStore>,
    pub note_images: Arc<dyn NoteImageStore>,
    pub note_checklist: Arc<dyn NoteChecklistStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub task_checklist: Arc<dyn TaskChecklistStore>,
    pub tags: Arc<dyn TagStore>,
    pub shares: Arc<dyn ShareStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub auth: Arc<dyn AuthProvider>,
    /// Image CDN client; `None` when provider configuration is missing.
    pub media: Option<Arc<dyn ImageStore>>,
    /// Global rate limiter; `None` when rate limiting is disabled.
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}
