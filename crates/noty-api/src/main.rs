//! noty-api - HTTP API server for the noty backend.

use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{Quota, RateLimiter};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noty_api::{app, parse_allowed_origins, AppState};
use noty_core::defaults;
use noty_data::{
    AuthClient, DataBackend, DataConfig, RestNoteChecklistStore, RestNoteImageStore, RestNoteStore,
    RestProfileStore, RestShareStore, RestTagStore, RestTaskChecklistStore, RestTaskStore,
};
use noty_media::{MediaClient, MediaConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   RUST_LOG    - standard env filter (default: "noty_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "noty_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("noty-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }
        Some(guard)
    } else if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
        None
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Data backend: required configuration, read once and injected
    let data_config = DataConfig::from_env()?;
    let backend = DataBackend::new(data_config)?;

    // Image CDN: optional. Without it the upload gateway answers with its
    // configuration error and never touches the network.
    let media: Option<Arc<dyn noty_core::ImageStore>> = match MediaConfig::from_env() {
        Some(config) => Some(Arc::new(MediaClient::new(config)?)),
        None => {
            warn!("Media provider secrets not set; image uploads are disabled");
            None
        }
    };

    // Rate limiting configuration
    // RATE_LIMIT_REQUESTS: requests per period (default: 100)
    // RATE_LIMIT_PERIOD_SECS: period in seconds (default: 60)
    let rate_limit_enabled: bool = std::env::var("RATE_LIMIT_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);
    let rate_limit_requests: u32 = std::env::var("RATE_LIMIT_REQUESTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(100);
    let rate_limit_period_secs: u64 = std::env::var("RATE_LIMIT_PERIOD_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(60);

    let rate_limiter = if rate_limit_enabled {
        let quota = Quota::with_period(std::time::Duration::from_secs(rate_limit_period_secs))
            .expect("Rate limit period must be non-zero")
            .allow_burst(NonZeroU32::new(rate_limit_requests).expect("Rate limit must be non-zero"));
        Some(Arc::new(RateLimiter::direct(quota)))
    } else {
        None
    };

    info!(
        "Rate limiting: {} ({} requests per {} seconds)",
        if rate_limit_enabled { "enabled" } else { "disabled" },
        rate_limit_requests,
        rate_limit_period_secs
    );

    let state = AppState {
        notes: Arc::new(RestNoteStore::new(backend.clone())),
        note_images: Arc::new(RestNoteImageStore::new(backend.clone())),
        note_checklist: Arc::new(RestNoteChecklistStore::new(backend.clone())),
        tasks: Arc::new(RestTaskStore::new(backend.clone())),
        task_checklist: Arc::new(RestTaskChecklistStore::new(backend.clone())),
        tags: Arc::new(RestTagStore::new(backend.clone())),
        shares: Arc::new(RestShareStore::new(backend.clone())),
        profiles: Arc::new(RestProfileStore::new(backend.clone())),
        auth: Arc::new(AuthClient::new(backend)),
        media,
        rate_limiter,
    };

    let allowed_origins = parse_allowed_origins(
        &std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
    );
    let router = app(state, allowed_origins);

    let host = std::env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults::PORT);
    let addr: SocketAddr = format!("{host}:{port}").parse()?;

    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install shutdown handler: {e}");
        return;
    }
    info!("Shutdown signal received");
}
