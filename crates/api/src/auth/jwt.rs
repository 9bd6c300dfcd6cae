//! JWT session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! `sid` claim carries the server-side session id, so sign-out can revoke
//! tokens before they expire: the auth extractor checks the session row on
//! every request.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's id.
    pub sub: Uuid,
    /// The user's email address.
    pub email: String,
    /// Server-side session id, checked for revocation on every request.
    pub sid: Uuid,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in days (default: 7).
    pub session_expiry_days: i64,
    /// Magic-link token lifetime in minutes (default: 15).
    pub login_token_expiry_mins: i64,
}

/// Default session expiry in days.
const DEFAULT_SESSION_EXPIRY_DAYS: i64 = 7;
/// Default magic-link token expiry in minutes.
const DEFAULT_LOGIN_TOKEN_EXPIRY_MINS: i64 = 15;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                        | Required | Default |
    /// |--------------------------------|----------|---------|
    /// | `JWT_SECRET`                   | **yes**  | --      |
    /// | `JWT_SESSION_EXPIRY_DAYS`      | no       | `7`     |
    /// | `LOGIN_TOKEN_EXPIRY_MINS`      | no       | `15`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let session_expiry_days: i64 = std::env::var("JWT_SESSION_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_SESSION_EXPIRY_DAYS must be a valid i64");

        let login_token_expiry_mins: i64 = std::env::var("LOGIN_TOKEN_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_LOGIN_TOKEN_EXPIRY_MINS.to_string())
            .parse()
            .expect("LOGIN_TOKEN_EXPIRY_MINS must be a valid i64");

        Self {
            secret,
            session_expiry_days,
            login_token_expiry_mins,
        }
    }
}

/// Generate an HS256 session token for the given user and session.
pub fn generate_session_token(
    user_id: Uuid,
    email: &str,
    session_id: Uuid,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_days * 24 * 3600;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        sid: session_id,
        exp,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. Session revocation
/// is checked separately against the database.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
