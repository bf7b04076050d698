//! Integration tests for Content-ID generation

use mailsend_rs::content_id::{
    ContentId, ContentIdGenerator, HostIdentity, HostnameResolver, SEQUENCE_BOUND,
};
use mailsend_rs::{MailError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

struct UnresolvableHost;

impl HostnameResolver for UnresolvableHost {
    fn resolve(&self) -> Result<String> {
        Err(MailError::HostnameResolution("unknown host".to_string()))
    }
}

/// Checks the `<int>.<int>@<nonempty>` shape without whitespace
fn assert_well_formed(id: &str) {
    assert!(!id.chars().any(char::is_whitespace), "whitespace in {:?}", id);

    let (local, host) = id.split_once('@').expect("missing @");
    assert!(!host.is_empty());

    let (sequence, timestamp) = local.split_once('.').expect("missing .");
    let sequence: u32 = sequence.parse().expect("sequence is not an integer");
    let _: i64 = timestamp.parse().expect("timestamp is not an integer");
    assert!(sequence < SEQUENCE_BOUND);
}

#[test]
fn test_identifier_shape() {
    let generator = ContentIdGenerator::new("mail.example.com");
    for _ in 0..100 {
        let id = generator.next_identifier();
        assert_well_formed(&id);

        let parsed: ContentId = id.parse().unwrap();
        assert_eq!(parsed.host, "mail.example.com");
        assert_eq!(parsed.to_string(), id);
    }
}

#[test]
fn test_system_generator_is_well_formed() {
    let generator = ContentIdGenerator::from_system();
    assert!(!generator.host().is_empty());
    assert_well_formed(&generator.next_identifier());
}

#[test]
fn test_global_generator_is_shared() {
    let first = ContentIdGenerator::global();
    let second = ContentIdGenerator::global();
    assert!(std::ptr::eq(first, second));
    assert_ne!(first.next_identifier(), second.next_identifier());
}

#[test]
fn test_fallback_host_when_resolution_fails() {
    let identity = HostIdentity::resolve(&UnresolvableHost);
    assert!(identity.is_fallback());

    let generator = ContentIdGenerator::from_identity(identity);
    let id = generator.next_identifier();
    assert_well_formed(&id);

    let parsed: ContentId = id.parse().unwrap();
    assert!(parsed.host.ends_with(".localhost"));
}

#[test]
fn test_consecutive_identifiers_never_equal() {
    let generator = ContentIdGenerator::new("localhost");
    let mut previous = generator.next_identifier();
    for _ in 0..1_000 {
        let next = generator.next_identifier();
        assert_ne!(previous, next);
        previous = next;
    }
}

#[test]
fn test_wraparound_after_full_cycle() {
    let generator = ContentIdGenerator::new("localhost");
    let values: Vec<u32> = (0..=SEQUENCE_BOUND).map(|_| generator.next_sequence()).collect();

    assert_eq!(values.len(), SEQUENCE_BOUND as usize + 1);
    assert!(values[..SEQUENCE_BOUND as usize]
        .iter()
        .enumerate()
        .all(|(i, v)| *v == i as u32));
    assert_eq!(values[SEQUENCE_BOUND as usize], 0);
}

#[test]
fn test_concurrent_sequences_are_distinct() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 1_000;

    let generator = Arc::new(ContentIdGenerator::new("mail.example.com"));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| generator.next_content_id())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<ContentId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), THREADS * PER_THREAD);

    let sequences: HashSet<u32> = ids.iter().map(|id| id.sequence).collect();
    assert_eq!(sequences.len(), THREADS * PER_THREAD);

    let rendered: HashSet<String> = ids.iter().map(ToString::to_string).collect();
    assert_eq!(rendered.len(), THREADS * PER_THREAD);
}

#[test]
fn test_concurrent_callers_across_wrap() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 500;

    let generator = Arc::new(ContentIdGenerator::with_initial_sequence(
        "localhost",
        SEQUENCE_BOUND - 1_000,
    ));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                (0..PER_THREAD)
                    .map(|_| generator.next_sequence())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let values: Vec<u32> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();

    assert!(values.iter().all(|v| *v < SEQUENCE_BOUND));

    // 2000 calls starting 1000 below the bound: 1000 before the wrap, 1000 after
    let unique: HashSet<u32> = values.iter().copied().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
    assert_eq!(values.iter().filter(|v| **v < 1_000).count(), 1_000);
    assert_eq!(generator.peek_sequence(), 1_000);
}
