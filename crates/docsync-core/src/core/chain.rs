// crates/docsync-core/src/core/chain.rs
// ============================================================================
// Module: DocSync Hash Chain
// Description: Hash-linked ledger entries over claim verdicts.
// Purpose: Provide deterministic, order-sensitive chain construction.
// Dependencies: crate::core::{hashing, identifiers, manifest, verdict}, serde
// ============================================================================

//! ## Overview
//! Each chain entry's hash covers its own canonical verdict content and the
//! previous entry's hash, so altering, removing, or reordering any entry is
//! detectable from that index onward. Construction is an explicit fold: the
//! prior hash is passed between steps with no hidden state.
//!
//! The canonical hashed body excludes `index`, `entry_hash`, and `prev_hash`;
//! index contiguity and link continuity are verified separately.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::canonical_json_bytes;
use crate::core::hashing::hash_bytes;
use crate::core::identifiers::ClaimId;
use crate::core::manifest::DocMode;
use crate::core::verdict::EvidenceRef;
use crate::core::verdict::Outcome;
use crate::core::verdict::Verdict;

// ============================================================================
// SECTION: Genesis Constant
// ============================================================================

/// Fixed predecessor hash for the genesis entry: the all-zero SHA-256 digest
/// in lowercase hex. Stable across versions; part of the compatibility
/// contract.
pub const GENESIS_PREV_HEX: &str =
    "0000000000000000000000000000000000000000000000000000000000000000";

/// Returns the genesis predecessor digest.
#[must_use]
pub fn genesis_hash() -> HashDigest {
    HashDigest::from_hex(GENESIS_PREV_HEX)
}

// ============================================================================
// SECTION: Chain Input
// ============================================================================

/// A verdict paired with its owning document's mode, in canonical ledger
/// order.
///
/// # Invariants
/// - Records are ordered document-first, then claim order within the
///   document, regardless of evaluation completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    /// The evaluated verdict.
    pub verdict: Verdict,
    /// Authority mode of the owning document.
    pub mode: DocMode,
}

// ============================================================================
// SECTION: Chain Entries
// ============================================================================

/// One hash-linked record in the evidence ledger.
///
/// # Invariants
/// - Append-only within a run; never mutated after being hashed.
/// - `entry_hash` is a pure function of the canonical verdict content and
///   `prev_hash`; it does not depend on wall-clock time or external state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEntry {
    /// 0-based sequence index, contiguous with no gaps.
    pub index: u64,
    /// Identifier of the evaluated claim.
    pub claim_id: ClaimId,
    /// Authority mode of the owning document.
    pub mode: DocMode,
    /// Raw evaluation outcome.
    pub outcome: Outcome,
    /// Evidence references supporting the outcome.
    pub evidence_refs: Vec<EvidenceRef>,
    /// Human-readable explanation carried from the verdict.
    pub reason: String,
    /// Hash over the canonical entry body and `prev_hash`.
    pub entry_hash: HashDigest,
    /// Hash of the prior entry (genesis constant for index 0).
    pub prev_hash: HashDigest,
}

// ============================================================================
// SECTION: Canonical Body
// ============================================================================

/// Canonical hashed form of an entry, borrowed from its source fields.
///
/// Field ordering here is irrelevant to the digest: RFC 8785 sorts object
/// keys during serialization.
#[derive(Serialize)]
struct CanonicalEntryBody<'a> {
    /// Identifier of the evaluated claim.
    claim_id: &'a ClaimId,
    /// Authority mode of the owning document.
    mode: DocMode,
    /// Raw evaluation outcome.
    outcome: Outcome,
    /// Evidence references supporting the outcome.
    evidence_refs: &'a [EvidenceRef],
    /// Human-readable explanation.
    reason: &'a str,
}

/// Computes an entry hash from canonical verdict content and the prior hash.
///
/// `entry_hash = H(canonical_body_bytes || prev_hash_hex_bytes)`.
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization fails.
pub fn compute_entry_hash(
    algorithm: HashAlgorithm,
    claim_id: &ClaimId,
    mode: DocMode,
    outcome: Outcome,
    evidence_refs: &[EvidenceRef],
    reason: &str,
    prev_hash: &HashDigest,
) -> Result<HashDigest, HashError> {
    let body = CanonicalEntryBody {
        claim_id,
        mode,
        outcome,
        evidence_refs,
        reason,
    };
    let mut bytes = canonical_json_bytes(&body)?;
    bytes.extend_from_slice(prev_hash.as_str().as_bytes());
    Ok(hash_bytes(algorithm, &bytes))
}

// ============================================================================
// SECTION: Chain Builder
// ============================================================================

/// Builds the hash-linked ledger from verdict records in canonical order.
///
/// Indices are assigned by construction order starting at 0. The fold passes
/// the prior hash explicitly; the genesis entry links to
/// [`GENESIS_PREV_HEX`].
///
/// # Errors
///
/// Returns [`HashError`] when canonicalization of any entry body fails.
pub fn build_chain(
    algorithm: HashAlgorithm,
    records: &[VerdictRecord],
) -> Result<Vec<ChainEntry>, HashError> {
    let mut entries = Vec::with_capacity(records.len());
    let mut prev_hash = genesis_hash();
    for (index, record) in records.iter().enumerate() {
        let entry_hash = compute_entry_hash(
            algorithm,
            &record.verdict.claim_id,
            record.mode,
            record.verdict.outcome,
            &record.verdict.evidence,
            &record.verdict.reason,
            &prev_hash,
        )?;
        entries.push(ChainEntry {
            index: index as u64,
            claim_id: record.verdict.claim_id.clone(),
            mode: record.mode,
            outcome: record.verdict.outcome,
            evidence_refs: record.verdict.evidence.clone(),
            reason: record.verdict.reason.clone(),
            entry_hash: entry_hash.clone(),
            prev_hash,
        });
        prev_hash = entry_hash;
    }
    Ok(entries)
}
