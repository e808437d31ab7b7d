//! Mock image store for deterministic testing.
//!
//! Returns sequential, stable URLs and records every call so tests can
//! assert on upload counts and injected failures. Identical payloads still
//! produce distinct URLs, matching the real provider's no-dedup behavior.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use noty_core::{Error, ImageStore, Result};

/// Recorded upload call.
#[derive(Debug, Clone)]
pub struct MockUpload {
    pub size: usize,
    pub content_type: String,
}

/// Mock image store.
#[derive(Clone, Default)]
pub struct MockImageStore {
    counter: Arc<AtomicUsize>,
    uploads: Arc<Mutex<Vec<MockUpload>>>,
    deletes: Arc<Mutex<Vec<String>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl MockImageStore {
    /// Create a mock that accepts every upload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with the given provider message.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        *self.failure.lock().unwrap() = Some(message.into());
        self
    }

    /// Number of upload calls made so far.
    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    /// All recorded upload calls.
    pub fn uploads(&self) -> Vec<MockUpload> {
        self.uploads.lock().unwrap().clone()
    }

    /// All recorded delete calls.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn upload(&self, bytes: &[u8], content_type: &str) -> Result<String> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Remote {
                status: 500,
                message,
            });
        }

        self.uploads.lock().unwrap().push(MockUpload {
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://mock.cdn/noty-app/{n}"))
    }

    async fn delete(&self, public_id: &str) -> Result<()> {
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Remote {
                status: 500,
                message,
            });
        }
        self.deletes.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identical_uploads_get_distinct_urls() {
        let store = MockImageStore::new();
        let first = store.upload(b"same bytes", "image/png").await.unwrap();
        let second = store.upload(b"same bytes", "image/png").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(store.upload_count(), 2);
    }

    #[tokio::test]
    async fn test_urls_are_https() {
        let store = MockImageStore::new();
        let url = store.upload(b"x", "image/jpeg").await.unwrap();
        assert!(url.starts_with("https://"));
    }

    #[tokio::test]
    async fn test_injected_failure_surfaces_as_remote_error() {
        let store = MockImageStore::new().with_failure("Invalid signature");
        let err = store.upload(b"x", "image/png").await.unwrap_err();
        match err {
            Error::Remote { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Invalid signature");
            }
            other => panic!("Expected Remote error, got {other:?}"),
        }
        assert_eq!(store.upload_count(), 0);
    }
}
