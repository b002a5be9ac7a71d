// crates/docsync-core/src/core/verdict.rs
// ============================================================================
// Module: DocSync Verdict Model
// Description: Claim outcomes, evidence references, and mode classification.
// Purpose: Provide the per-claim result records that feed the hash chain.
// Dependencies: crate::core::{identifiers, manifest}, serde
// ============================================================================

//! ## Overview
//! A verdict is the raw pass/fail/skip outcome of evaluating one claim's
//! evidence rules. The chain records verdicts together with the owning
//! document's mode; the externally reported classification is re-derived from
//! those two fields, so it never needs to be hashed separately.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::ClaimId;
use crate::core::manifest::DocMode;
use crate::core::manifest::EvidenceKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length for evidence snippets carried into pack entries.
pub const MAX_SNIPPET_LEN: usize = 120;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Outcome of evaluating a claim's evidence rules.
///
/// # Invariants
/// - `Skip` signals "not assessed" and must never be conflated with `Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every evidence rule found at least one match.
    Pass,
    /// At least one rule found zero matches in an existing scope.
    Fail,
    /// The claim could not be assessed.
    Skip,
}

// ============================================================================
// SECTION: Evidence References
// ============================================================================

/// A pointer to a piece of evidence found in source.
///
/// Carries a file location and a short excerpt, never full file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRef {
    /// Evidence source kind that produced the match.
    pub kind: EvidenceKind,
    /// File path relative to the repository root.
    pub path: String,
    /// 1-based line number where evidence was found (0 = not applicable).
    pub line: u32,
    /// Short excerpt of the matching line.
    pub snippet: String,
}

impl EvidenceRef {
    /// Creates a new evidence reference, truncating the snippet to
    /// [`MAX_SNIPPET_LEN`] characters.
    #[must_use]
    pub fn new(kind: EvidenceKind, path: impl Into<String>, line: u32, snippet: &str) -> Self {
        Self {
            kind,
            path: path.into(),
            line,
            snippet: truncate_snippet(snippet),
        }
    }
}

/// Truncates a snippet on a character boundary.
fn truncate_snippet(snippet: &str) -> String {
    snippet.chars().take(MAX_SNIPPET_LEN).collect()
}

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Result of evaluating one claim from the manifest.
///
/// # Invariants
/// - Created exactly once per claim during a run and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Identifier of the evaluated claim.
    pub claim_id: ClaimId,
    /// Raw evaluation outcome.
    pub outcome: Outcome,
    /// Evidence references supporting the outcome.
    pub evidence: Vec<EvidenceRef>,
    /// Human-readable explanation (e.g. skip reasons).
    pub reason: String,
}

// ============================================================================
// SECTION: Mode Resolver
// ============================================================================

/// Externally reported classification of a verdict under a document mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Evidence supports the claim.
    Satisfied,
    /// Code diverges from documented truth (spec-first fail).
    Violation,
    /// Documentation should be revised to match code (reality-first fail).
    UpdateNeeded,
    /// The claim was not assessed.
    Unverified,
}

/// Maps a raw outcome plus the owning document's mode to its classification.
///
/// This mapping changes only the reported label and downstream remediation
/// intent; it never changes the underlying verdict or hashed chain content.
#[must_use]
pub const fn classify(outcome: Outcome, mode: DocMode) -> Classification {
    match (outcome, mode) {
        (Outcome::Pass, _) => Classification::Satisfied,
        (Outcome::Fail, DocMode::SpecFirst) => Classification::Violation,
        (Outcome::Fail, DocMode::RealityFirst) => Classification::UpdateNeeded,
        (Outcome::Skip, _) => Classification::Unverified,
    }
}
