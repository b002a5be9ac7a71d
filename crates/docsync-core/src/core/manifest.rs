// crates/docsync-core/src/core/manifest.rs
// ============================================================================
// Module: DocSync Manifest Model
// Description: Claims, evidence rules, and document registrations.
// Purpose: Provide the read-only input model for a verification run.
// Dependencies: crate::core::{hashing, identifiers}, serde
// ============================================================================

//! ## Overview
//! A manifest registers documents, each carrying an ordered list of claims
//! with evidence rules. The manifest is immutable for the duration of a run;
//! its canonical hash is captured once, before any evaluation begins, so a
//! verifier can confirm which manifest state produced a pack.
//!
//! Document and claim order is significant: it fixes ledger entry order and
//! therefore every chain hash downstream.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashDigest;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::ClaimId;
use crate::core::identifiers::DocPath;

// ============================================================================
// SECTION: Evidence Rules
// ============================================================================

/// Evidence source kind for a rule.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
/// - Unrecognized kinds deserialize to [`EvidenceKind::Unknown`] so a claim
///   with a bad kind resolves to a skip verdict instead of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// Search source code files.
    Code,
    /// Search markdown documentation files.
    Markdown,
    /// Unrecognized kind; the owning rule cannot be evaluated.
    #[serde(other)]
    Unknown,
}

impl EvidenceKind {
    /// Returns the stable string label for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Unknown => "unknown",
        }
    }
}

/// A single pattern+scope search used to validate a claim against source.
///
/// # Invariants
/// - `pattern` is a regular expression or literal string; accessors decide
///   how to interpret invalid patterns.
/// - `scope` is a repository-relative path prefix; empty means the whole
///   repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRule {
    /// Evidence source kind.
    pub kind: EvidenceKind,
    /// Pattern to search for.
    pub pattern: String,
    /// Path prefix constraining which files are searched.
    #[serde(default)]
    pub scope: String,
}

// ============================================================================
// SECTION: Claims and Documents
// ============================================================================

/// A single testable assertion extracted from a document.
///
/// # Invariants
/// - Immutable once extracted from a manifest snapshot.
/// - Rules combine with AND semantics: every rule must find at least one
///   match for the claim to pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Claim identifier, unique across the manifest.
    pub id: ClaimId,
    /// Human-readable assertion text.
    pub text: String,
    /// Ordered evidence rules backing the claim.
    #[serde(default)]
    pub evidence: Vec<EvidenceRule>,
}

/// Authority mode determining whether doc or code is treated as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocMode {
    /// Document text is authoritative; divergent code is a violation.
    SpecFirst,
    /// Code is authoritative; divergent docs need updating.
    RealityFirst,
}

/// A document registered in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Repository-relative document path.
    pub path: DocPath,
    /// Authority mode for the document.
    pub mode: DocMode,
    /// Ordered claims declared by the document.
    #[serde(default)]
    pub claims: Vec<Claim>,
}

// ============================================================================
// SECTION: Manifest
// ============================================================================

/// Top-level manifest: the read-only input of a verification run.
///
/// # Invariants
/// - Document order, and claim order within documents, fix ledger order.
/// - The snapshot hash is computed over the canonical JSON form before any
///   evaluation begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest schema version string.
    pub version: String,
    /// Ordered document registrations.
    #[serde(default)]
    pub docs: Vec<Document>,
}

impl Manifest {
    /// Computes the manifest snapshot hash over the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn snapshot_hash(&self, algorithm: HashAlgorithm) -> Result<HashDigest, HashError> {
        hash_canonical_json(algorithm, self)
    }

    /// Returns the total number of claims across all documents.
    #[must_use]
    pub fn claim_count(&self) -> usize {
        self.docs.iter().map(|doc| doc.claims.len()).sum()
    }

    /// Validates manifest structure, returning human-readable errors.
    ///
    /// An empty result means the manifest is valid. Structural problems in
    /// individual evidence rules (unknown kinds, bad patterns) are not
    /// validation errors; they surface as skip verdicts during evaluation.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.version.is_empty() {
            errors.push("manifest.version is required".to_string());
        }
        if self.docs.is_empty() {
            errors.push("manifest.docs must contain at least one entry".to_string());
        }
        let mut seen_ids: Vec<&str> = Vec::new();
        for doc in &self.docs {
            if doc.path.as_str().is_empty() {
                errors.push("doc entry missing 'path'".to_string());
            }
            for claim in &doc.claims {
                if claim.id.as_str().is_empty() {
                    errors.push(format!("doc '{}': claim missing 'id'", doc.path));
                } else if seen_ids.contains(&claim.id.as_str()) {
                    errors.push(format!("duplicate claim id: {}", claim.id));
                } else {
                    seen_ids.push(claim.id.as_str());
                }
                if claim.text.is_empty() {
                    errors.push(format!("doc '{}': claim '{}' missing 'text'", doc.path, claim.id));
                }
            }
        }
        errors
    }
}
