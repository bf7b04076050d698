//! Addressing and delivery of composed drafts

use crate::content_id::ContentIdGenerator;
use crate::error::{MailError, Result};
use crate::message::Draft;
use lettre::address::Envelope;
use lettre::message::{Mailbox, MessageBuilder};
use lettre::{Address, AsyncTransport, Message};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info};

/// Sends drafts through a lettre transport
///
/// Delivery is attempted once; transport failures are returned as
/// [`MailError::Transport`].
///
/// # Examples
/// ```no_run
/// use mailsend_rs::config::Config;
/// use mailsend_rs::content_id::ContentIdGenerator;
/// use mailsend_rs::message::MessageComposer;
/// use mailsend_rs::smtp::{build_transport, Mailer};
/// use std::sync::Arc;
///
/// # async fn example() -> mailsend_rs::Result<()> {
/// let config = Config::default();
/// let ids = Arc::new(ContentIdGenerator::from_system());
/// let mailer = Mailer::new(build_transport(&config.smtp)?, config.sender_mailbox()?, ids.clone());
///
/// let draft = MessageComposer::new(ids).simple_message()?;
/// mailer.address_and_send(draft, "someone@example.com").await?;
/// # Ok(())
/// # }
/// ```
pub struct Mailer<T> {
    transport: T,
    from: Mailbox,
    ids: Arc<ContentIdGenerator>,
}

impl<T> Mailer<T>
where
    T: AsyncTransport + Sync,
    T::Error: Display,
{
    pub fn new(transport: T, from: Mailbox, ids: Arc<ContentIdGenerator>) -> Self {
        Self {
            transport,
            from,
            ids,
        }
    }

    /// Set the `To` header to `recipient` and send
    pub async fn address_and_send(&self, draft: Draft, recipient: &str) -> Result<()> {
        let to = parse_mailbox(recipient)?;
        let message = self.builder(&draft).to(to).multipart(draft.body)?;
        self.deliver(message, &draft.subject).await
    }

    /// Send to an explicit list of envelope recipients, without a `To` header
    pub async fn send_to(&self, draft: Draft, recipients: &[&str]) -> Result<()> {
        if recipients.is_empty() {
            return Err(MailError::InvalidEmail("No recipients".to_string()));
        }

        let to = recipients
            .iter()
            .map(|r| parse_mailbox(r).map(|m| m.email))
            .collect::<Result<Vec<Address>>>()?;
        let envelope = Envelope::new(Some(self.from.email.clone()), to)?;

        let message = self.builder(&draft).envelope(envelope).multipart(draft.body)?;
        self.deliver(message, &draft.subject).await
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn builder(&self, draft: &Draft) -> MessageBuilder {
        let message_id = self.ids.next_content_id();

        Message::builder()
            .from(self.from.clone())
            .subject(draft.subject.clone())
            .message_id(Some(message_id.header_value()))
            .date_now()
    }

    async fn deliver(&self, message: Message, subject: &str) -> Result<()> {
        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(ToString::to_string)
            .collect();

        info!("Sending \"{}\" to {}", subject, recipients.join(", "));

        match self.transport.send(message).await {
            Ok(_) => {
                info!("Mail sent successfully to {}", recipients.join(", "));
                Ok(())
            }
            Err(e) => {
                error!("Failed to send \"{}\": {}", subject, e);
                Err(MailError::Transport(e.to_string()))
            }
        }
    }
}

fn parse_mailbox(value: &str) -> Result<Mailbox> {
    value
        .parse()
        .map_err(|e| MailError::InvalidEmail(format!("{}: {}", value, e)))
}
