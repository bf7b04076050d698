//! Host identity used as the right-hand side of generated identifiers

use crate::error::{MailError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::ToSocketAddrs;
use tracing::{debug, warn};

/// Suffix appended to the random token when the hostname cannot be resolved
pub const FALLBACK_SUFFIX: &str = ".localhost";

/// Upper bound (exclusive) of the random number in a fallback token
const FALLBACK_RANGE: u32 = 100_000;

/// Source of the machine's network hostname
pub trait HostnameResolver {
    /// Resolve the hostname, or fail with [`MailError::HostnameResolution`]
    fn resolve(&self) -> Result<String>;
}

/// Resolves the hostname reported by the operating system
///
/// The name must be valid UTF-8 without whitespace and must resolve
/// through the system resolver, otherwise resolution fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHostnameResolver;

impl HostnameResolver for SystemHostnameResolver {
    fn resolve(&self) -> Result<String> {
        let raw = gethostname::gethostname();
        let hostname = raw
            .to_str()
            .ok_or_else(|| MailError::HostnameResolution("hostname is not valid UTF-8".to_string()))?
            .trim()
            .to_string();

        if hostname.is_empty() {
            return Err(MailError::HostnameResolution("hostname is empty".to_string()));
        }

        if hostname.chars().any(char::is_whitespace) {
            return Err(MailError::HostnameResolution(format!(
                "hostname contains whitespace: {:?}",
                hostname
            )));
        }

        let mut addrs = (hostname.as_str(), 0).to_socket_addrs().map_err(|e| {
            MailError::HostnameResolution(format!("cannot resolve {}: {}", hostname, e))
        })?;

        if addrs.next().is_none() {
            return Err(MailError::HostnameResolution(format!(
                "{} has no addresses",
                hostname
            )));
        }

        debug!("Resolved local hostname: {}", hostname);
        Ok(hostname)
    }
}

/// Outcome of the one-time host initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostIdentity {
    /// The machine's own hostname
    Resolved(String),
    /// Synthesized `<n>.localhost` token used when resolution failed
    Fallback(String),
}

impl HostIdentity {
    /// Resolve the host identity, falling back to a random token on failure
    ///
    /// Never fails: a resolver error is logged and replaced by a
    /// `<n>.localhost` token with `n` drawn from an RNG seeded with the
    /// current time in milliseconds.
    pub fn resolve(resolver: &dyn HostnameResolver) -> Self {
        match resolver.resolve() {
            Ok(hostname) => HostIdentity::Resolved(hostname),
            Err(e) => {
                let fallback = Self::fallback_token(chrono::Utc::now().timestamp_millis() as u64);
                warn!("{}; using fallback host {}", e, fallback);
                HostIdentity::Fallback(fallback)
            }
        }
    }

    /// Build the fallback token from a seed
    pub fn fallback_token(seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        format!("{}{}", rng.gen_range(0..FALLBACK_RANGE), FALLBACK_SUFFIX)
    }

    /// The host string embedded in identifiers
    pub fn as_str(&self) -> &str {
        match self {
            HostIdentity::Resolved(host) | HostIdentity::Fallback(host) => host,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, HostIdentity::Fallback(_))
    }

    pub fn into_string(self) -> String {
        match self {
            HostIdentity::Resolved(host) | HostIdentity::Fallback(host) => host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedResolver(&'static str);

    impl HostnameResolver for FixedResolver {
        fn resolve(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingResolver;

    impl HostnameResolver for FailingResolver {
        fn resolve(&self) -> Result<String> {
            Err(MailError::HostnameResolution("no network identity".to_string()))
        }
    }

    #[test]
    fn test_resolved_identity() {
        let identity = HostIdentity::resolve(&FixedResolver("mail.example.com"));
        assert_eq!(identity, HostIdentity::Resolved("mail.example.com".to_string()));
        assert!(!identity.is_fallback());
        assert_eq!(identity.as_str(), "mail.example.com");
    }

    #[test]
    fn test_fallback_identity() {
        let identity = HostIdentity::resolve(&FailingResolver);
        assert!(identity.is_fallback());
        assert!(identity.as_str().ends_with(".localhost"));

        let number = identity.as_str().trim_end_matches(FALLBACK_SUFFIX);
        let n: u32 = number.parse().unwrap();
        assert!(n < FALLBACK_RANGE);
    }

    #[test]
    fn test_fallback_token_is_seeded() {
        assert_eq!(HostIdentity::fallback_token(42), HostIdentity::fallback_token(42));
    }

    #[test]
    fn test_into_string() {
        let identity = HostIdentity::Fallback("7.localhost".to_string());
        assert_eq!(identity.into_string(), "7.localhost");
    }
}
