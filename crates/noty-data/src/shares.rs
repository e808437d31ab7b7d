//! Note share repository.
//!
//! A share references its recipient by email; `shared_with_user_id` is
//! filled in when the email already has a profile and stays null
//! otherwise, so the incoming-shares query matches on either column. The
//! backend enforces uniqueness per (note, recipient); the violation
//! arrives here as `Error::Duplicate` via the client's error mapping.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use noty_core::{Result, SharedNote, ShareStore, ShareWithNote};

use crate::client::{eq, first_row, DataBackend};

const TABLE: &str = "shared_notes";

/// Embedded select for a share plus the note it refers to.
const SHARE_WITH_NOTE: &str = "*,note:notes(id,user_id,title,content,cover_image_url,created_at,updated_at)";

/// Data-backend implementation of [`ShareStore`].
#[derive(Clone)]
pub struct RestShareStore {
    backend: DataBackend,
}

impl RestShareStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

/// Recipient-match filter. The email value is quoted so grammar
/// characters in an address cannot break the expression.
pub(crate) fn recipient_filter(email: &str, user_id: Uuid) -> String {
    format!(
        "(shared_with_email.eq.\"{}\",shared_with_user_id.eq.{user_id})",
        email.replace('"', "")
    )
}

#[async_trait]
impl ShareStore for RestShareStore {
    async fn shared_with_me(
        &self,
        token: &str,
        email: &str,
        user_id: Uuid,
    ) -> Result<Vec<ShareWithNote>> {
        self.backend
            .select(
                token,
                TABLE,
                &[
                    ("select", SHARE_WITH_NOTE.into()),
                    ("or", recipient_filter(email, user_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await
    }

    async fn shared_by_me(&self, token: &str, owner_id: Uuid) -> Result<Vec<ShareWithNote>> {
        self.backend
            .select(
                token,
                TABLE,
                &[
                    ("select", SHARE_WITH_NOTE.into()),
                    ("owner_id", eq(owner_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await
    }

    async fn create(
        &self,
        token: &str,
        owner_id: Uuid,
        note_id: Uuid,
        email: &str,
        recipient_id: Option<Uuid>,
        can_edit: bool,
    ) -> Result<SharedNote> {
        let rows = self
            .backend
            .insert(
                token,
                TABLE,
                json!({
                    "note_id": note_id,
                    "owner_id": owner_id,
                    "shared_with_email": email,
                    "shared_with_user_id": recipient_id,
                    "can_edit": can_edit,
                }),
            )
            .await?;
        first_row(rows, "share")
    }

    async fn remove(&self, token: &str, share_id: Uuid) -> Result<()> {
        self.backend
            .delete(token, TABLE, &[("id", eq(share_id))])
            .await
    }
}
