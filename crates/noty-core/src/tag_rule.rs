//! The single-tag rule.
//!
//! The backend's `note_tags`/`task_tags` join tables permit many tags per
//! item, but the product allows at most one. The rule lives here, above the
//! many-to-many store, so every assignment path (notes and tasks) funnels
//! through the same validation and the storage model stays untouched.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Validate a tag selection against the single-tag rule.
///
/// Accepts zero tags (clear the assignment) or exactly one. More than one
/// is an input error, never silently truncated.
pub fn validate_selection(tag_ids: &[Uuid]) -> Result<Option<Uuid>> {
    match tag_ids {
        [] => Ok(None),
        [one] => Ok(Some(*one)),
        many => Err(Error::InvalidInput(format!(
            "At most one tag may be assigned, got {}",
            many.len()
        ))),
    }
}
