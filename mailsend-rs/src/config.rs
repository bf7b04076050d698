//! Configuration for mailsend-rs

use crate::error::{MailError, Result};
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable consulted when the SMTP password is not in the config file
pub const PASSWORD_ENV: &str = "MAILSEND_SMTP_PASSWORD";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub smtp: SmtpSettings,
    pub sender: SenderConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// SMTP session settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upgrade the connection with STARTTLS
    #[serde(default)]
    pub starttls: bool,
    /// Authenticate with username/password
    #[serde(default)]
    pub auth: bool,
    pub username: Option<String>,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// Connection timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Verbose session logging
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SenderConfig {
    pub from: String,
}

/// Recipients and resources used by the `send` command
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_image_path")]
    pub image_path: String,
    #[serde(default = "default_simple_recipient")]
    pub simple_recipient: String,
    #[serde(default = "default_attachment_recipient")]
    pub attachment_recipient: String,
    #[serde(default = "default_embedded_recipient")]
    pub embedded_recipient: String,
}

fn default_port() -> u16 {
    25
}

fn default_image_path() -> String {
    "resources/teapot.jpg".to_string()
}

fn default_simple_recipient() -> String {
    "someone@example.com".to_string()
}

fn default_attachment_recipient() -> String {
    "somebody@example.com".to_string()
}

fn default_embedded_recipient() -> String {
    "my.friend@example.com".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            image_path: default_image_path(),
            simple_recipient: default_simple_recipient(),
            attachment_recipient: default_attachment_recipient(),
            embedded_recipient: default_embedded_recipient(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MailError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| MailError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Session for a local relay that requires neither TLS nor authentication
    pub fn simple() -> Self {
        Self {
            smtp: SmtpSettings {
                host: "localhost".to_string(),
                port: 25,
                starttls: false,
                auth: false,
                username: None,
                password: None,
                timeout_secs: None,
                debug: false,
            },
            sender: SenderConfig {
                from: "example@example.com".to_string(),
            },
            demo: DemoConfig::default(),
        }
    }

    /// Session for Gmail: STARTTLS on 587 with authentication
    pub fn gmail() -> Self {
        Self {
            smtp: SmtpSettings {
                host: "smtp.gmail.com".to_string(),
                port: 587,
                starttls: true,
                auth: true,
                username: Some("example@gmail.com".to_string()),
                password: None,
                timeout_secs: Some(30),
                debug: true,
            },
            sender: SenderConfig {
                from: "example@gmail.com".to_string(),
            },
            demo: DemoConfig::default(),
        }
    }

    /// Validate addresses and SMTP settings
    pub fn validate(&self) -> Result<()> {
        if self.smtp.host.trim().is_empty() {
            return Err(MailError::Config("SMTP host is empty".to_string()));
        }

        if self.smtp.port == 0 {
            return Err(MailError::Config("SMTP port must be non-zero".to_string()));
        }

        if self.smtp.auth && self.smtp.username.is_none() {
            return Err(MailError::Config(
                "SMTP auth enabled but no username configured".to_string(),
            ));
        }

        self.sender_mailbox()?;

        for recipient in [
            &self.demo.simple_recipient,
            &self.demo.attachment_recipient,
            &self.demo.embedded_recipient,
        ] {
            recipient
                .parse::<Mailbox>()
                .map_err(|e| MailError::InvalidEmail(format!("{}: {}", recipient, e)))?;
        }

        Ok(())
    }

    pub fn sender_mailbox(&self) -> Result<Mailbox> {
        self.sender
            .from
            .parse()
            .map_err(|e| MailError::InvalidEmail(format!("{}: {}", self.sender.from, e)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::simple()
    }
}

impl SmtpSettings {
    /// Password from the config file, or from [`PASSWORD_ENV`]
    pub fn resolve_password(&self) -> Option<String> {
        self.password
            .clone()
            .or_else(|| std::env::var(PASSWORD_ENV).ok())
    }
}
