//! # noty-media
//!
//! Image CDN client for the noty backend.
//!
//! This crate owns the one genuine integration contract in the system: it
//! takes raw image bytes, signs an upload request over a canonical
//! parameter string, submits it to the provider's REST endpoint, and hands
//! back the resulting public HTTPS URL. Provider failures are reduced to a
//! single human-readable message; provider internals never leak upward.

pub mod client;
pub mod config;
pub mod mock;
pub mod signature;

pub use client::MediaClient;
pub use config::MediaConfig;
pub use mock::MockImageStore;
