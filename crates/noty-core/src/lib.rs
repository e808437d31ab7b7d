//! # noty-core
//!
//! Core types, traits, and abstractions for the noty backend.
//!
//! This crate provides the domain entities, the error taxonomy, and the
//! store traits that the other noty crates implement and consume. It owns
//! no I/O: both persistence and image storage live behind remote service
//! boundaries reached through the traits defined here.

pub mod defaults;
pub mod error;
pub mod models;
pub mod tag_rule;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use tag_rule::validate_selection;
pub use traits::*;
