// crates/docsync-core/src/runtime/verifier.rs
// ============================================================================
// Module: DocSync Pack Verifier
// Description: Offline hash-chain verification for evidence packs.
// Purpose: Recompute every entry hash and localize the first broken link.
// Dependencies: crate::core, serde
// ============================================================================

//! ## Overview
//! Verification is self-contained: it consumes only a deserialized evidence
//! pack and never re-accesses the codebase or the manifest. Every entry hash
//! is recomputed from the entry's canonical body and its *stored* previous
//! hash, which localizes the first broken link. One bad link invalidates the
//! pack from that point forward; entries before the break remain reportable
//! as "verified up to index k".

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::chain::compute_entry_hash;
use crate::core::chain::genesis_hash;
use crate::core::hashing::HashAlgorithm;
use crate::core::pack::EvidencePack;

// ============================================================================
// SECTION: Verification Types
// ============================================================================

/// Verification status for an evidence pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// The whole chain verified.
    Pass,
    /// The chain diverged at `fault.index`.
    Fail,
}

/// Reason a chain entry failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FaultReason {
    /// The genesis entry does not link to the fixed genesis constant.
    GenesisMismatch,
    /// Sequence indices are not contiguous from 0.
    IndexGap {
        /// Index expected at this position.
        expected: u64,
        /// Index actually present.
        actual: u64,
    },
    /// The stored previous hash does not match the prior entry's hash.
    LinkMismatch,
    /// The recomputed entry hash does not match the stored hash.
    HashMismatch,
    /// The entry body could not be canonicalized.
    MalformedEntry {
        /// Canonicalization failure message.
        message: String,
    },
}

/// First point of divergence in a failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainFault {
    /// 0-based position of the first offending entry.
    pub index: u64,
    /// Why the entry failed.
    pub reason: FaultReason,
}

/// Offline verification report for an evidence pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Verification status.
    pub status: VerificationStatus,
    /// Number of entries verified before the first fault (all of them on
    /// success).
    pub verified_entries: usize,
    /// First divergence point, when verification failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<ChainFault>,
}

impl VerificationReport {
    /// Returns true when the pack verified end to end.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.status, VerificationStatus::Pass)
    }
}

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Evidence pack verifier for offline validation.
#[derive(Debug, Clone, Copy)]
pub struct PackVerifier {
    /// Hash algorithm used for recomputation.
    algorithm: HashAlgorithm,
}

impl PackVerifier {
    /// Creates a new verifier.
    #[must_use]
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
        }
    }

    /// Verifies a pack's chain integrity without re-accessing the codebase.
    ///
    /// Checks, per entry and in order: index contiguity, genesis linkage,
    /// link continuity against the prior *stored* hash, and the recomputed
    /// entry hash. Stops at the first fault.
    #[must_use]
    pub fn verify(&self, pack: &EvidencePack) -> VerificationReport {
        let genesis = genesis_hash();
        for (position, entry) in pack.entries.iter().enumerate() {
            let expected_index = position as u64;
            let fault = |reason: FaultReason| VerificationReport {
                status: VerificationStatus::Fail,
                verified_entries: position,
                fault: Some(ChainFault {
                    index: expected_index,
                    reason,
                }),
            };

            if entry.index != expected_index {
                return fault(FaultReason::IndexGap {
                    expected: expected_index,
                    actual: entry.index,
                });
            }

            let expected_prev =
                if position == 0 { &genesis } else { &pack.entries[position - 1].entry_hash };
            if entry.prev_hash != *expected_prev {
                let reason = if position == 0 {
                    FaultReason::GenesisMismatch
                } else {
                    FaultReason::LinkMismatch
                };
                return fault(reason);
            }

            let recomputed = match compute_entry_hash(
                self.algorithm,
                &entry.claim_id,
                entry.mode,
                entry.outcome,
                &entry.evidence_refs,
                &entry.reason,
                &entry.prev_hash,
            ) {
                Ok(digest) => digest,
                Err(err) => {
                    return fault(FaultReason::MalformedEntry {
                        message: err.to_string(),
                    });
                }
            };
            if recomputed != entry.entry_hash {
                return fault(FaultReason::HashMismatch);
            }
        }

        VerificationReport {
            status: VerificationStatus::Pass,
            verified_entries: pack.entries.len(),
            fault: None,
        }
    }
}
