//! Centralized default constants for the noty backend.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// UPLOADS
// =============================================================================

/// Target folder on the image CDN. One logical namespace for the whole
/// application; there is no per-user partitioning.
pub const UPLOAD_FOLDER: &str = "noty-app";

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Router-wide request body cap. Kept above [`MAX_UPLOAD_BYTES`] so
/// oversized uploads reach the gateway and receive its JSON 400 instead of
/// a bare 413 from the limit layer.
pub const MAX_REQUEST_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Fallback media type when an upload declares none.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/jpeg";

// =============================================================================
// REMOTE SERVICES
// =============================================================================

/// Timeout for data backend calls (seconds).
pub const DATA_TIMEOUT_SECS: u64 = 15;

/// Timeout for image CDN uploads (seconds).
pub const MEDIA_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const HOST: &str = "0.0.0.0";

/// Default bind port.
pub const PORT: u16 = 3000;
