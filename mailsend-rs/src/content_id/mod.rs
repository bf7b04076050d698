//! Content-ID generation
//!
//! Identifiers correlate one part of a multipart message with another,
//! e.g. an HTML body referencing an inline image through `cid:`.

pub mod generator;
pub mod host;
pub mod types;

pub use generator::{ContentIdGenerator, SEQUENCE_BOUND};
pub use host::{HostIdentity, HostnameResolver, SystemHostnameResolver, FALLBACK_SUFFIX};
pub use types::ContentId;
