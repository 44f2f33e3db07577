mod common;

use common::FakeHistory;
use recifetch::pipeline::{Deduplicator, Unavailable};

#[test]
fn test_mark_seen_then_is_new() {
    let mut d = Deduplicator::new();
    d.mark_seen("v1");
    assert!(!d.is_new("v1"));
    assert!(d.is_new("v2"));
}

#[test]
fn test_mark_seen_idempotent() {
    let mut d = Deduplicator::new();
    d.mark_seen("v1");
    d.mark_seen("v1");
    assert_eq!(d.len(), 1);
}

#[test]
fn test_seeded_ids_are_not_new() {
    let mut d = Deduplicator::new();
    d.seed(["a", "b"]);
    assert!(!d.is_new("a"));
    assert!(!d.is_new("b"));
    assert!(d.is_new("c"));
}

#[test]
fn test_reseed_same_ids_idempotent() {
    let mut d = Deduplicator::new();
    d.seed(vec!["a".to_string(), "b".to_string()]);
    d.seed(vec!["a".to_string(), "b".to_string()]);
    assert_eq!(d.len(), 2);
    assert!(d.is_new("c"));
}

#[test]
fn test_check_and_mark() {
    let mut d = Deduplicator::new();
    assert!(d.check_and_mark("v1"));
    assert!(!d.check_and_mark("v1"));
    assert!(!d.is_new("v1"));
}

#[test]
fn test_seed_from_store() {
    let mut d = Deduplicator::new();
    d.seed_from(&FakeHistory(vec!["x".to_string(), "y".to_string()]));
    assert_eq!(d.len(), 2);
    assert!(!d.is_new("x"));
}

#[test]
fn test_seed_from_unavailable_store_degrades_to_empty() {
    let mut d = Deduplicator::new();
    d.seed_from(&Unavailable("connection refused".to_string()));
    assert!(d.is_empty());
    assert!(d.is_new("anything"));
}
