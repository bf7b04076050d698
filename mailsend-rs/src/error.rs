use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Hostname resolution failed: {0}")]
    HostnameResolution(String),

    #[error("Message build error: {0}")]
    Message(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Invalid content id: {0}")]
    InvalidContentId(String),
}

impl From<lettre::error::Error> for MailError {
    fn from(e: lettre::error::Error) -> Self {
        MailError::Message(e.to_string())
    }
}

impl From<lettre::address::AddressError> for MailError {
    fn from(e: lettre::address::AddressError) -> Self {
        MailError::InvalidEmail(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MailError>;
