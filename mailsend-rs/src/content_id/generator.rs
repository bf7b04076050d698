//! Collision-resistant identifier generator

use super::host::{HostIdentity, SystemHostnameResolver};
use super::types::ContentId;
use chrono::Utc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use tracing::info;

/// Sequence numbers run from 0 to `SEQUENCE_BOUND - 1`, then wrap to 0
pub const SEQUENCE_BOUND: u32 = 100_000;

static GLOBAL: OnceLock<ContentIdGenerator> = OnceLock::new();

/// Generates very-likely-unique identifiers from a wrapping counter,
/// the current time in milliseconds and the local hostname
///
/// Two identifiers only collide if they share the counter value, the
/// millisecond timestamp and the host.
///
/// # Examples
/// ```
/// use mailsend_rs::content_id::ContentIdGenerator;
///
/// let generator = ContentIdGenerator::new("mail.example.com");
/// assert_eq!(generator.next_sequence(), 0);
///
/// let id = generator.next_identifier();
/// assert!(id.starts_with("1."));
/// assert!(id.ends_with("@mail.example.com"));
/// ```
#[derive(Debug)]
pub struct ContentIdGenerator {
    sequence: AtomicU32,
    host: String,
}

impl ContentIdGenerator {
    /// Create a generator for the given host, counter starting at 0
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_initial_sequence(host, 0)
    }

    /// Create a generator whose counter starts at `start` (reduced modulo the bound)
    pub fn with_initial_sequence(host: impl Into<String>, start: u32) -> Self {
        Self {
            sequence: AtomicU32::new(start % SEQUENCE_BOUND),
            host: host.into(),
        }
    }

    /// Create a generator from a resolved host identity
    pub fn from_identity(identity: HostIdentity) -> Self {
        Self::new(identity.into_string())
    }

    /// Resolve the system hostname (or a fallback) and create a generator
    pub fn from_system() -> Self {
        let identity = HostIdentity::resolve(&SystemHostnameResolver);
        info!("Content-ID host: {}", identity.as_str());
        Self::from_identity(identity)
    }

    /// Process-wide generator, initialized from the system hostname on first use
    pub fn global() -> &'static ContentIdGenerator {
        GLOBAL.get_or_init(Self::from_system)
    }

    /// Return the current counter value and advance it, wrapping at the bound
    pub fn next_sequence(&self) -> u32 {
        match self.sequence.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            Some((current + 1) % SEQUENCE_BOUND)
        }) {
            Ok(previous) | Err(previous) => previous,
        }
    }

    /// Value the next call to [`next_sequence`](Self::next_sequence) will return
    pub fn peek_sequence(&self) -> u32 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Generate a structured identifier
    pub fn next_content_id(&self) -> ContentId {
        let sequence = self.next_sequence();
        ContentId {
            sequence,
            timestamp_millis: Utc::now().timestamp_millis(),
            host: self.host.clone(),
        }
    }

    /// Generate an identifier string: `<sequence>.<millis>@<host>`
    pub fn next_identifier(&self) -> String {
        self.next_content_id().to_string()
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_five_sequences() {
        let generator = ContentIdGenerator::new("localhost");
        let values: Vec<u32> = (0..5).map(|_| generator.next_sequence()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_wraparound_at_bound() {
        let generator = ContentIdGenerator::with_initial_sequence("localhost", SEQUENCE_BOUND - 1);
        assert_eq!(generator.next_sequence(), 99_999);
        assert_eq!(generator.next_sequence(), 0);
        assert_eq!(generator.next_sequence(), 1);
    }

    #[test]
    fn test_initial_sequence_is_reduced() {
        let generator = ContentIdGenerator::with_initial_sequence("localhost", SEQUENCE_BOUND + 7);
        assert_eq!(generator.peek_sequence(), 7);
    }

    #[test]
    fn test_full_cycle() {
        let generator = ContentIdGenerator::new("localhost");
        for expected in 0..SEQUENCE_BOUND {
            assert_eq!(generator.next_sequence(), expected);
        }
        assert_eq!(generator.next_sequence(), 0);
    }

    #[test]
    fn test_identifier_uses_host() {
        let generator = ContentIdGenerator::with_initial_sequence("mail.example.com", 41);
        let id = generator.next_content_id();
        assert_eq!(id.sequence, 41);
        assert_eq!(id.host, "mail.example.com");
        assert!(id.timestamp_millis > 0);
    }

    #[test]
    fn test_consecutive_identifiers_differ() {
        let generator = ContentIdGenerator::new("localhost");
        let first = generator.next_identifier();
        let second = generator.next_identifier();
        assert_ne!(first, second);
    }

    #[test]
    fn test_from_fallback_identity() {
        let generator =
            ContentIdGenerator::from_identity(HostIdentity::Fallback("123.localhost".to_string()));
        assert_eq!(generator.host(), "123.localhost");
        assert!(generator.next_identifier().ends_with("@123.localhost"));
    }
}
