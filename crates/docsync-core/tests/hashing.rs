// crates/docsync-core/tests/hashing.rs
// ============================================================================
// Module: Hashing Tests
// Description: Tests for canonical JSON hashing and digests.
// ============================================================================
//! ## Overview
//! Validates deterministic hashing using RFC 8785 canonicalization and the
//! lowercase hex digest representation.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use docsync_core::hashing::DEFAULT_HASH_ALGORITHM;
use docsync_core::hashing::HashError;
use docsync_core::hashing::canonical_json_bytes;
use docsync_core::hashing::canonical_json_bytes_with_limit;
use docsync_core::hashing::hash_bytes;
use docsync_core::hashing::hash_canonical_json;
use serde_json::json;

// ============================================================================
// SECTION: Canonical Hashing
// ============================================================================

/// Tests canonical json hash is stable under key reordering.
#[test]
fn test_canonical_json_hash_is_stable() {
    let value_a = json!({"b": 1, "a": 2});
    let value_b = json!({"a": 2, "b": 1});

    let hash_a = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &value_a).unwrap();
    let hash_b = hash_canonical_json(DEFAULT_HASH_ALGORITHM, &value_b).unwrap();

    assert_eq!(hash_a, hash_b);
}

/// Tests canonical bytes sort object keys.
#[test]
fn test_canonical_json_bytes_sort_keys() {
    let value = json!({"zeta": 1, "alpha": 2});
    let bytes = canonical_json_bytes(&value).unwrap();
    assert_eq!(bytes, br#"{"alpha":2,"zeta":1}"#);
}

/// Tests digests are lowercase hex of the expected width.
#[test]
fn test_digest_is_lowercase_hex() {
    let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, b"evidence");
    assert_eq!(digest.as_str().len(), 64);
    assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

/// Tests distinct inputs produce distinct digests.
#[test]
fn test_distinct_inputs_distinct_digests() {
    let hash_a = hash_bytes(DEFAULT_HASH_ALGORITHM, b"a");
    let hash_b = hash_bytes(DEFAULT_HASH_ALGORITHM, b"b");
    assert_ne!(hash_a, hash_b);
}

// ============================================================================
// SECTION: Size Limits
// ============================================================================

/// Tests the size-limited canonicalizer rejects oversized output.
#[test]
fn test_canonical_json_size_limit_enforced() {
    let value = json!({"payload": "x".repeat(64)});
    let err = canonical_json_bytes_with_limit(&value, 8).unwrap_err();
    match err {
        HashError::SizeLimitExceeded { limit, actual } => {
            assert_eq!(limit, 8);
            assert!(actual > limit);
        }
        HashError::Canonicalization(message) => {
            panic!("unexpected canonicalization failure: {message}")
        }
    }
}

/// Tests the size-limited canonicalizer passes small output through.
#[test]
fn test_canonical_json_size_limit_allows_small() {
    let value = json!({"k": 1});
    let bytes = canonical_json_bytes_with_limit(&value, 64).unwrap();
    assert_eq!(bytes, br#"{"k":1}"#);
}
