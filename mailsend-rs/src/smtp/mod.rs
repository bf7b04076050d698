//! SMTP delivery
//!
//! This module hands composed drafts to lettre for delivery.
//!
//! # Features
//! - Plain relay or STARTTLS sessions
//! - Optional username/password authentication
//! - `To`-header addressing or explicit envelope recipients

pub mod mailer;
pub mod transport;

pub use mailer::Mailer;
pub use transport::{build_transport, TokioSmtpTransport};
