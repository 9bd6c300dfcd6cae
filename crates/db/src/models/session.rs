//! Session row model.

use sqlx::FromRow;
use uuid::Uuid;

use showroom_core::types::Timestamp;

/// A row from the `sessions` table. The session id travels inside the JWT's
/// `sid` claim so sign-out can revoke tokens before they expire.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
