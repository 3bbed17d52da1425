//! Owner session model for dashboard authentication.
//!
//! Sessions are issued by the external sign-in provider. This service only reads them:
//! a bearer token is hashed with SHA-256 and looked up in `owner_sessions`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents an owner session record from the database.
///
/// # Database Table
///
/// Maps to the `owner_sessions` table with columns:
/// - `token_hash`: SHA-256 hash of the bearer token (64 hex characters)
/// - `owner_id`: the signed-in owner
/// - `created_at`: when the session was issued
/// - `expires_at`: sessions past this instant are rejected
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OwnerSession {
    pub token_hash: String,

    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl OwnerSession {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
