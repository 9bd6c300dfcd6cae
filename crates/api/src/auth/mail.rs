//! Magic-link mail delivery.
//!
//! When SMTP is configured, links go out via lettre's async SMTP transport.
//! Without SMTP (local development, CI) the link is logged instead so the
//! flow stays testable end to end.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::error::{AppError, AppResult};

/// Send a magic sign-in link to `email`.
pub async fn send_magic_link(
    smtp: Option<&SmtpConfig>,
    email: &str,
    link: &str,
) -> AppResult<()> {
    let Some(smtp) = smtp else {
        tracing::info!(%email, %link, "SMTP not configured; magic link logged");
        return Ok(());
    };

    let message = Message::builder()
        .from(
            smtp.from_address
                .parse()
                .map_err(|e| AppError::InternalError(format!("Invalid SMTP from address: {e}")))?,
        )
        .to(email
            .parse()
            .map_err(|e| AppError::BadRequest(format!("Invalid email address: {e}")))?)
        .subject("Your sign-in link")
        .header(ContentType::TEXT_PLAIN)
        .body(format!(
            "Click the link below to sign in to the developer portal.\n\n\
             {link}\n\n\
             This link expires shortly and can only be used once. If you did \
             not request it, you can ignore this email."
        ))
        .map_err(|e| AppError::InternalError(format!("Failed to build email: {e}")))?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)
        .map_err(|e| AppError::InternalError(format!("SMTP relay setup failed: {e}")))?
        .credentials(Credentials::new(
            smtp.username.clone(),
            smtp.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to send email: {e}")))?;

    tracing::info!(%email, "Magic link sent");
    Ok(())
}
