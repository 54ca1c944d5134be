//! Verification email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Configuration for the SMTP email delivery service.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable     | Required | Default                   |
    /// |--------------|----------|---------------------------|
    /// | `SMTP_HOST`  | yes      | --                        |
    /// | `SMTP_PORT`  | no       | `587`                     |
    /// | `EMAIL_USER` | no       | --                        |
    /// | `EMAIL_PASS` | no       | --                        |
    /// | `SMTP_FROM`  | no       | `EMAIL_USER`              |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())?;
        let smtp_user = std::env::var("EMAIL_USER").ok();
        let from_address = std::env::var("SMTP_FROM")
            .ok()
            .or_else(|| smtp_user.clone())
            .unwrap_or_else(|| format!("noreply@{smtp_host}"));

        Some(Self {
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_host,
            from_address,
            smtp_user,
            smtp_password: std::env::var("EMAIL_PASS").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends account emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the address verification email with a link to `verify_link`.
    pub async fn send_verification(
        &self,
        to_email: &str,
        verify_link: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject("Verify your email address")
            .header(ContentType::TEXT_HTML)
            .body(verification_body(verify_link))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to = to_email, "Verification email sent");
        Ok(())
    }
}

/// Link the web client opens to complete verification.
pub fn verification_link(frontend_url: &str, token: &str) -> String {
    format!("{frontend_url}/verifyEmail?token={token}")
}

fn verification_body(verify_link: &str) -> String {
    format!(
        "<p>Welcome to CCB-Sys.</p>\
         <p>Please confirm your email address by following the link below. \
         The link expires in one hour.</p>\
         <p><a href=\"{verify_link}\">Verify email</a></p>"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_points_at_frontend_route() {
        assert_eq!(
            verification_link("http://localhost:5173", "a.b.c"),
            "http://localhost:5173/verifyEmail?token=a.b.c"
        );
    }

    #[test]
    fn body_embeds_link() {
        let body = verification_body("http://x.test/verifyEmail?token=t");
        assert!(body.contains("href=\"http://x.test/verifyEmail?token=t\""));
    }

    #[test]
    fn email_error_display_build() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn email_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = EmailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
