//! Profile repository.
//!
//! Profiles mirror the auth user id; the share dialog uses the search
//! operation to find recipients by email or name.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use noty_core::{Profile, ProfileStore, Result, UpdateProfileRequest};

use crate::client::{eq, first_row, DataBackend};

const TABLE: &str = "profiles";

/// Data-backend implementation of [`ProfileStore`].
#[derive(Clone)]
pub struct RestProfileStore {
    backend: DataBackend,
}

impl RestProfileStore {
    pub fn new(backend: DataBackend) -> Self {
        Self { backend }
    }
}

/// Search expression over email and full name. Wildcard characters in the
/// query are stripped rather than escaped; a literal `%` search is not a
/// supported use case.
pub(crate) fn search_filter(query: &str) -> String {
    let cleaned: String = query
        .chars()
        .filter(|c| !matches!(c, '%' | '*' | ',' | '(' | ')' | '"'))
        .collect();
    format!("(email.ilike.*{cleaned}*,full_name.ilike.*{cleaned}*)")
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn get(&self, token: &str, user_id: Uuid) -> Result<Profile> {
        self.backend
            .select_one(token, TABLE, &[("select", "*".into()), ("id", eq(user_id))])
            .await
    }

    async fn find_by_email(&self, token: &str, email: &str) -> Result<Option<Profile>> {
        let rows: Vec<Profile> = self
            .backend
            .select(
                token,
                TABLE,
                &[
                    ("select", "id,email,full_name,avatar_url,updated_at".into()),
                    ("email", eq(email)),
                    ("limit", "1".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn search(&self, token: &str, query: &str, exclude: Uuid) -> Result<Vec<Profile>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.backend
            .select(
                token,
                TABLE,
                &[
                    ("select", "id,email,full_name,avatar_url".into()),
                    ("or", search_filter(query)),
                    ("id", format!("neq.{exclude}")),
                    ("limit", "10".into()),
                ],
            )
            .await
    }

    async fn update(
        &self,
        token: &str,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<Profile> {
        let rows = self
            .backend
            .update(
                token,
                TABLE,
                &[("id", eq(user_id))],
                json!({
                    "full_name": req.full_name,
                    "avatar_url": req.avatar_url,
                    "updated_at": Utc::now(),
                }),
            )
            .await?;
        first_row(rows, "profile")
    }
}
