//! # noty-data
//!
//! Client for the remote data backend.
//!
//! The backend is a hosted relational store with row-level security,
//! consumed purely as a service: a table-oriented REST API for rows and a
//! set of session endpoints for auth. This crate never defines the
//! backend's internals; it constructs well-formed requests against the
//! known schema and maintains the client-side invariants (ordering
//! indices, single-tag assignment) the schema itself does not enforce.
//!
//! One module per table-level concern, each implementing the matching
//! store trait from `noty-core`. [`mock`] provides in-memory
//! implementations of every trait for tests.

pub mod auth;
pub mod client;
pub mod config;
pub mod mock;
pub mod note_checklist;
pub mod note_images;
pub mod notes;
pub mod profiles;
pub mod shares;
pub mod tags;
pub mod tasks;

pub use auth::AuthClient;
pub use client::DataBackend;
pub use config::DataConfig;
pub use mock::MockBackend;
pub use note_checklist::RestNoteChecklistStore;
pub use note_images::RestNoteImageStore;
pub use notes::RestNoteStore;
pub use profiles::RestProfileStore;
pub use shares::RestShareStore;
pub use tags::RestTagStore;
pub use tasks::{RestTaskChecklistStore, RestTaskStore};
