use crate::error::MailError;
use std::fmt;
use std::str::FromStr;

/// A generated identifier: `<sequence>.<timestamp_millis>@<host>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId {
    /// Counter value, always below [`super::SEQUENCE_BOUND`]
    pub sequence: u32,
    /// Wall-clock milliseconds since the Unix epoch
    pub timestamp_millis: i64,
    /// Resolved hostname or fallback token
    pub host: String,
}

impl ContentId {
    /// Value for a MIME `Content-ID` or `Message-ID` header (`<...>`)
    pub fn header_value(&self) -> String {
        format!("<{}>", self)
    }

    /// Reference usable from an HTML body (`cid:...`)
    pub fn cid_url(&self) -> String {
        format!("cid:{}", self)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}@{}", self.sequence, self.timestamp_millis, self.host)
    }
}

impl FromStr for ContentId {
    type Err = MailError;

    /// Parse the rendered form, with or without surrounding angle brackets
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || MailError::InvalidContentId(value.to_string());

        let trimmed = value.trim();
        let inner = trimmed
            .strip_prefix('<')
            .and_then(|v| v.strip_suffix('>'))
            .unwrap_or(trimmed);

        if inner.chars().any(char::is_whitespace) {
            return Err(invalid());
        }

        let (local, host) = inner.split_once('@').ok_or_else(invalid)?;
        if host.is_empty() {
            return Err(invalid());
        }

        let (sequence, timestamp) = local.split_once('.').ok_or_else(invalid)?;
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(sequence) || !all_digits(timestamp) {
            return Err(invalid());
        }

        Ok(ContentId {
            sequence: sequence.parse().map_err(|_| invalid())?,
            timestamp_millis: timestamp.parse().map_err(|_| invalid())?,
            host: host.to_string(),
        })
    }
}
