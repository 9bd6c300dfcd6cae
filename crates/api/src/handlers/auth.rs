//! Handlers for the magic-link authentication flow.
//!
//! Sign-in is passwordless: the client requests a link, the link carries a
//! one-time token, and verifying the token opens a session and returns a
//! JWT. The response to a link request never reveals whether the address is
//! known.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use showroom_core::error::CoreError;
use showroom_db::models::user::User;
use showroom_db::repositories::{LoginTokenRepo, SessionRepo, UserRepo};
use validator::ValidateEmail;

use crate::auth::jwt::generate_session_token;
use crate::auth::mail::send_magic_link;
use crate::auth::token::{generate_login_token, hash_login_token};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MagicLinkRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MagicLinkResponse {
    pub message: &'static str,
}

/// POST /api/v1/auth/magic-link
///
/// Issue a one-time sign-in link. Responds 202 regardless of whether the
/// email belongs to an existing account.
pub async fn magic_link(
    State(state): State<AppState>,
    Json(input): Json<MagicLinkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MagicLinkResponse>>)> {
    let email = input.email.trim();
    if !email.validate_email() {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email address is required".into(),
        )));
    }

    let (plaintext, token_hash) = generate_login_token();
    let expires_at = Utc::now() + Duration::minutes(state.config.jwt.login_token_expiry_mins);
    LoginTokenRepo::create(&state.pool, email, &token_hash, expires_at).await?;

    let link = format!(
        "{}/auth/verify?token={plaintext}",
        state.config.portal_base_url.trim_end_matches('/')
    );
    send_magic_link(state.config.smtp.as_ref(), email, &link).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(DataResponse {
            data: MagicLinkResponse {
                message: "If the address is valid, a sign-in link has been sent",
            },
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
}

/// POST /api/v1/auth/verify
///
/// Exchange a one-time token for a session JWT. The first successful
/// verification for an email creates the account.
pub async fn verify(
    State(state): State<AppState>,
    Json(input): Json<VerifyRequest>,
) -> AppResult<Json<DataResponse<SessionResponse>>> {
    let token_hash = hash_login_token(input.token.trim());

    // Unknown, expired, and already-used tokens are indistinguishable here.
    let login_token = LoginTokenRepo::consume(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired sign-in link".into(),
            ))
        })?;

    let user = UserRepo::find_or_create(&state.pool, &login_token.email).await?;

    let session_expires_at = Utc::now() + Duration::days(state.config.jwt.session_expiry_days);
    let session = SessionRepo::create(&state.pool, user.id, session_expires_at).await?;

    let token = generate_session_token(user.id, &user.email, session.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign session token: {e}")))?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok(Json(DataResponse {
        data: SessionResponse { token, user },
    }))
}

/// GET /api/v1/auth/session
pub async fn session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Unknown account".into())))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/auth/logout
///
/// Revokes every live session for the account; all outstanding JWTs stop
/// working immediately.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = %auth.user_id, revoked, "User signed out");
    Ok(StatusCode::NO_CONTENT)
}
