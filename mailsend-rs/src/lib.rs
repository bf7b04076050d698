//! mailsend-rs: Compose and send demo emails over SMTP
//!
//! Builds plain, attachment and embedded-image messages and delivers them
//! through lettre. Inline images are tied to their HTML reference by a
//! generated Content-ID.
//!
//! # Features
//!
//! - **Content-IDs**: `<sequence>.<millis>@<host>` identifiers from a
//!   lock-free wrapping counter
//! - **Composition**: multipart/mixed and multipart/related messages
//! - **Delivery**: plain or STARTTLS SMTP sessions with optional auth
//!
//! # Example
//!
//! ```no_run
//! use mailsend_rs::config::Config;
//! use mailsend_rs::content_id::ContentIdGenerator;
//! use mailsend_rs::message::MessageComposer;
//! use mailsend_rs::smtp::{build_transport, Mailer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let ids = Arc::new(ContentIdGenerator::from_system());
//!
//!     let composer = MessageComposer::new(Arc::clone(&ids));
//!     let mailer = Mailer::new(build_transport(&config.smtp)?, config.sender_mailbox()?, ids);
//!
//!     let draft = composer.message_with_embedded_image("resources/teapot.jpg").await?;
//!     mailer.address_and_send(draft, "my.friend@example.com").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration management
//! - [`content_id`]: Unique identifier generation
//! - [`error`]: Error types and handling
//! - [`message`]: Message composition
//! - [`smtp`]: Transport construction and delivery

pub mod config;
pub mod content_id;
pub mod error;
pub mod message;
pub mod smtp;

// Re-export commonly used types
pub use config::Config;
pub use content_id::{ContentId, ContentIdGenerator};
pub use error::{MailError, Result};
