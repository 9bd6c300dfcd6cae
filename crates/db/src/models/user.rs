//! User and one-time login-token row models.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use showroom_core::types::Timestamp;

/// A row from the `users` table. Principals are identified by email only;
/// authentication is delegated to the magic-link flow.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub created_at: Timestamp,
}

/// A row from the `login_tokens` table: a single-use magic-link token,
/// stored hashed.
#[derive(Debug, Clone, FromRow)]
pub struct LoginToken {
    pub id: Uuid,
    pub email: String,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub consumed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
