//! Builds the demo messages

use crate::content_id::{ContentId, ContentIdGenerator};
use crate::error::{MailError, Result};
use crate::message::Draft;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::debug;

pub const GREETING_TEXT: &str = "Hello there! This is simple demo message";

const HTML_CONTENT_TYPE: &str = "text/html; charset=us-ascii";

/// Composes the plain, attachment and embedded-image messages
///
/// # Examples
/// ```no_run
/// use mailsend_rs::content_id::ContentIdGenerator;
/// use mailsend_rs::message::MessageComposer;
/// use std::sync::Arc;
///
/// # async fn example() -> mailsend_rs::Result<()> {
/// let composer = MessageComposer::new(Arc::new(ContentIdGenerator::from_system()));
/// let draft = composer.message_with_embedded_image("resources/teapot.jpg").await?;
/// assert_eq!(draft.subject, "Demo HTML message");
/// # Ok(())
/// # }
/// ```
pub struct MessageComposer {
    ids: Arc<ContentIdGenerator>,
}

impl MessageComposer {
    pub fn new(ids: Arc<ContentIdGenerator>) -> Self {
        Self { ids }
    }

    /// A multipart message with a single plain text part
    pub fn simple_message(&self) -> Result<Draft> {
        let body = MultiPart::mixed().singlepart(SinglePart::plain(GREETING_TEXT.to_string()));
        Ok(Draft::new("Demo message", body))
    }

    /// A text part followed by the file at `path` as an attachment
    pub async fn message_with_attachment<P: AsRef<Path>>(&self, path: P) -> Result<Draft> {
        let attachment = Self::load_attachment(path.as_ref()).await?;

        let body = MultiPart::mixed()
            .singlepart(SinglePart::plain(GREETING_TEXT.to_string()))
            .singlepart(attachment);

        Ok(Draft::new("Demo message with a teapot!", body))
    }

    /// An HTML part displaying the image at `path` inline
    ///
    /// Both parts share one freshly generated identifier: the HTML
    /// references it as `cid:ID` and the image carries `Content-ID: <ID>`.
    pub async fn message_with_embedded_image<P: AsRef<Path>>(&self, path: P) -> Result<Draft> {
        let path = path.as_ref();
        let data = fs::read(path).await?;
        let content_type = Self::guess_content_type(path)?;

        let cid = self.ids.next_content_id();
        debug!("Embedding {} as {}", path.display(), cid);

        let html = SinglePart::builder()
            .header(Self::parse_content_type(HTML_CONTENT_TYPE)?)
            .body(embedded_image_html(&cid));

        let image = Attachment::new_inline(cid.to_string()).body(data, content_type);

        let body = MultiPart::related().singlepart(html).singlepart(image);

        Ok(Draft::new("Demo HTML message", body).with_content_id(cid))
    }

    async fn load_attachment(path: &Path) -> Result<SinglePart> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MailError::Message(format!("No file name in {}", path.display())))?
            .to_string();

        let data = fs::read(path).await?;
        let content_type = Self::guess_content_type(path)?;
        debug!("Attaching {} ({} bytes)", filename, data.len());

        Ok(Attachment::new(filename).body(data, content_type))
    }

    fn guess_content_type(path: &Path) -> Result<ContentType> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        Self::parse_content_type(mime.essence_str())
    }

    fn parse_content_type(value: &str) -> Result<ContentType> {
        ContentType::parse(value)
            .map_err(|e| MailError::Message(format!("Invalid content type {}: {}", value, e)))
    }
}

/// HTML body referencing an inline image by content id
///
/// Lines stay short so the part can go out as 7bit.
pub fn embedded_image_html(cid: &ContentId) -> String {
    format!(
        "<html><head>\n\
         <title>This is not usually displayed</title>\n\
         </head>\n\
         <body><div><b>Hi there!</b></div>\n\
         <div>Sending HTML in email is so <i>cool!</i> </div>\n\
         <div>And here's an image:\n\
         <img src=\"{}\" /></div>\n\
         <div>I hope you like it!</div></body></html>",
        cid.cid_url()
    )
}
