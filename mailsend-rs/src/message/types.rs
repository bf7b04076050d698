use crate::content_id::ContentId;
use lettre::message::MultiPart;

/// A composed message that has not been addressed yet
#[derive(Debug, Clone)]
pub struct Draft {
    /// Subject line
    pub subject: String,
    /// Multipart body
    pub body: MultiPart,
    /// Identifiers of inline parts referenced from the body
    pub content_ids: Vec<ContentId>,
}

impl Draft {
    pub fn new(subject: impl Into<String>, body: MultiPart) -> Self {
        Self {
            subject: subject.into(),
            body,
            content_ids: Vec::new(),
        }
    }

    pub fn with_content_id(mut self, id: ContentId) -> Self {
        self.content_ids.push(id);
        self
    }

    /// Raw MIME rendering of the body
    pub fn formatted_body(&self) -> Vec<u8> {
        self.body.formatted()
    }
}
