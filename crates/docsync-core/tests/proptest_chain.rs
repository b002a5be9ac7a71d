// crates/docsync-core/tests/proptest_chain.rs
// ============================================================================
// Module: Chain Property-Based Tests
// Description: Property tests for chain construction and verification.
// Purpose: Detect tamper-evidence gaps across wide verdict input ranges.
// ============================================================================

//! Property-based tests for hash chain invariants.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use docsync_core::ClaimId;
use docsync_core::DocMode;
use docsync_core::EvidencePack;
use docsync_core::Outcome;
use docsync_core::PACK_VERSION;
use docsync_core::PackVerifier;
use docsync_core::RunnerInfo;
use docsync_core::Timestamp;
use docsync_core::Verdict;
use docsync_core::VerdictRecord;
use docsync_core::build_chain;
use docsync_core::hashing::DEFAULT_HASH_ALGORITHM;
use docsync_core::hashing::HashDigest;
use proptest::prelude::*;

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![Just(Outcome::Pass), Just(Outcome::Fail), Just(Outcome::Skip)]
}

fn mode_strategy() -> impl Strategy<Value = DocMode> {
    prop_oneof![Just(DocMode::SpecFirst), Just(DocMode::RealityFirst)]
}

fn record_strategy() -> impl Strategy<Value = VerdictRecord> {
    ("[a-z][a-z0-9-]{0,16}", outcome_strategy(), ".{0,64}", mode_strategy()).prop_map(
        |(id, outcome, reason, mode)| VerdictRecord {
            verdict: Verdict {
                claim_id: ClaimId::new(id),
                outcome,
                evidence: Vec::new(),
                reason,
            },
            mode,
        },
    )
}

fn pack_from(records: &[VerdictRecord]) -> EvidencePack {
    EvidencePack {
        version: PACK_VERSION.to_string(),
        manifest_snapshot_hash: HashDigest::from_hex("ef".repeat(32)),
        entries: build_chain(DEFAULT_HASH_ALGORITHM, records).unwrap(),
        timestamp: Timestamp::UnixMillis(1_700_000_000_000),
        runner: RunnerInfo {
            name: "docsync".to_string(),
            version: "0.1.0".to_string(),
        },
        sanitization: None,
    }
}

proptest! {
    /// Any chain built from verdict records verifies end to end.
    #[test]
    fn built_chains_always_verify(records in prop::collection::vec(record_strategy(), 0..16)) {
        let pack = pack_from(&records);
        let report = PackVerifier::new(DEFAULT_HASH_ALGORITHM).verify(&pack);
        prop_assert!(report.is_valid());
        prop_assert_eq!(report.verified_entries, records.len());
    }

    /// Rewriting any entry's reason is caught at exactly that index.
    #[test]
    fn reason_tamper_is_localized(
        records in prop::collection::vec(record_strategy(), 1..16),
        tamper_seed in any::<usize>(),
    ) {
        let mut pack = pack_from(&records);
        let target = tamper_seed % pack.entries.len();
        let tampered = format!("{}-tampered", pack.entries[target].reason);
        pack.entries[target].reason = tampered;

        let report = PackVerifier::new(DEFAULT_HASH_ALGORITHM).verify(&pack);
        prop_assert!(!report.is_valid());
        let fault = report.fault.unwrap();
        prop_assert_eq!(fault.index, u64::try_from(target).unwrap());
        prop_assert_eq!(report.verified_entries, target);
    }
}
