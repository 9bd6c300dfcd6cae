//! Repositories for the magic-link and session tables.

use sqlx::PgPool;
use uuid::Uuid;

use showroom_core::types::Timestamp;

use crate::models::session::Session;
use crate::models::user::LoginToken;

const LOGIN_TOKEN_COLUMNS: &str = "id, email, token_hash, expires_at, consumed_at, created_at";
const SESSION_COLUMNS: &str = "id, user_id, expires_at, revoked_at, created_at";

/// Provides operations for one-time magic-link tokens. Only the token hash is
/// stored; the plaintext token exists solely in the emailed link.
pub struct LoginTokenRepo;

impl LoginTokenRepo {
    /// Record a freshly-issued token hash for an email.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<LoginToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO login_tokens (email, token_hash, expires_at) \
             VALUES (LOWER($1), $2, $3) \
             RETURNING {LOGIN_TOKEN_COLUMNS}"
        );
        sqlx::query_as::<_, LoginToken>(&query)
            .bind(email)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume an unexpired, unconsumed token. Returns `None` for
    /// unknown, expired, or already-used tokens, all indistinguishable to the
    /// caller.
    pub async fn consume(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<LoginToken>, sqlx::Error> {
        let query = format!(
            "UPDATE login_tokens SET consumed_at = now() \
             WHERE token_hash = $1 AND consumed_at IS NULL AND expires_at > now() \
             RETURNING {LOGIN_TOKEN_COLUMNS}"
        );
        sqlx::query_as::<_, LoginToken>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }
}

/// Provides operations for server-side sessions. The session id travels in
/// the JWT so sign-out can revoke outstanding tokens.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a session for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        expires_at: Timestamp,
    ) -> Result<Session, sqlx::Error> {
        let query = format!(
            "INSERT INTO sessions (user_id, expires_at) VALUES ($1, $2) \
             RETURNING {SESSION_COLUMNS}"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(user_id)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Fetch a session only if it is still live: not revoked, not expired.
    pub async fn find_active(pool: &PgPool, id: Uuid) -> Result<Option<Session>, sqlx::Error> {
        let query = format!(
            "SELECT {SESSION_COLUMNS} FROM sessions \
             WHERE id = $1 AND revoked_at IS NULL AND expires_at > now()"
        );
        sqlx::query_as::<_, Session>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Revoke every live session for a user. Sign-out invalidates all
    /// devices at once.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked_at = now() \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
