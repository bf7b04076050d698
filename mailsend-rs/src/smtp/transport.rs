//! SMTP transport construction
//!
//! The protocol, TLS and authentication are handled by lettre; this
//! module only maps [`SmtpSettings`] onto its transport builder.

use crate::config::{SmtpSettings, PASSWORD_ENV};
use crate::error::{MailError, Result};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, Tokio1Executor};
use std::time::Duration;
use tracing::{debug, info};

pub type TokioSmtpTransport = AsyncSmtpTransport<Tokio1Executor>;

/// Build an SMTP transport for the configured session
///
/// # Errors
/// Returns error if:
/// - STARTTLS is requested but the TLS parameters cannot be built
/// - auth is enabled without a username or password
pub fn build_transport(settings: &SmtpSettings) -> Result<TokioSmtpTransport> {
    let mut builder = if settings.starttls {
        TokioSmtpTransport::starttls_relay(settings.host.as_str())
            .map_err(|e| MailError::Transport(e.to_string()))?
    } else {
        TokioSmtpTransport::builder_dangerous(settings.host.as_str())
    };

    builder = builder.port(settings.port);

    if settings.auth {
        let username = settings
            .username
            .clone()
            .ok_or_else(|| MailError::Config("SMTP auth enabled but no username".to_string()))?;
        let password = settings.resolve_password().ok_or_else(|| {
            MailError::Config(format!(
                "SMTP auth enabled but no password (set smtp.password or {})",
                PASSWORD_ENV
            ))
        })?;
        debug!("Using SMTP credentials for {}", username);
        builder = builder.credentials(Credentials::new(username, password));
    }

    if let Some(secs) = settings.timeout_secs {
        builder = builder.timeout(Some(Duration::from_secs(secs)));
    }

    info!(
        "SMTP transport: {}:{} (starttls: {}, auth: {})",
        settings.host, settings.port, settings.starttls, settings.auth
    );

    Ok(builder.build())
}
