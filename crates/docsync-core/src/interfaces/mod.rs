// crates/docsync-core/src/interfaces/mod.rs
// ============================================================================
// Module: DocSync Interfaces
// Description: Backend-agnostic interfaces for codebase access and sanitization.
// Purpose: Define the contract surfaces used by the DocSync runtime.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how DocSync integrates with external collaborators
//! without embedding backend-specific details. The codebase accessor is a
//! pure, read-only query interface; the sanitizer is a capability injected
//! into the run pipeline so the core never depends on network or transport
//! details.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::manifest::EvidenceKind;

// ============================================================================
// SECTION: Codebase Accessor
// ============================================================================

/// Location of a pattern match inside the codebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// File path relative to the repository root.
    pub path: String,
    /// 1-based line number of the match.
    pub line: u32,
    /// Excerpt of the matching line.
    pub snippet: String,
}

/// Codebase search errors.
///
/// `ScopeMissing` and `InvalidPattern` are evaluation errors that resolve the
/// owning claim to skip; they never abort a run.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested scope does not exist in the codebase.
    #[error("scope not found: {0}")]
    ScopeMissing(String),
    /// The scope escapes the repository root or is otherwise malformed.
    #[error("invalid scope: {0}")]
    InvalidScope(String),
    /// The search pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
    /// Underlying access failure (I/O and similar).
    #[error("codebase access error: {0}")]
    Access(String),
}

/// Read-only query interface over a codebase snapshot.
///
/// Implementations must be safe to call concurrently across independent
/// claims and must not mutate the underlying tree.
pub trait CodebaseAccessor: Sync {
    /// Lists files of the given kind under a scope.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ScopeMissing`] when the scope does not exist.
    fn list_files(&self, kind: EvidenceKind, scope: &str) -> Result<Vec<String>, SearchError>;

    /// Searches file contents for a pattern within a scope.
    ///
    /// An `Ok` result with zero matches means the scope exists and was
    /// genuinely searched.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] when the scope is missing or the pattern
    /// cannot be evaluated.
    fn search(
        &self,
        kind: EvidenceKind,
        pattern: &str,
        scope: &str,
    ) -> Result<Vec<SearchMatch>, SearchError>;
}

// ============================================================================
// SECTION: Sanitizer
// ============================================================================

/// Result of sanitizing one text fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedText {
    /// Sanitized text with redactions applied.
    pub text: String,
    /// Number of redactions applied to this fragment.
    pub redactions: u64,
}

/// Sanitizer errors.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The sanitization engine reported a failure.
    #[error("sanitizer failure: {0}")]
    Failed(String),
}

/// Text sanitization capability applied upstream of chain construction.
///
/// The core does not implement sanitization logic itself; it only carries
/// the attestation of what an injected engine did.
pub trait Sanitizer: Sync {
    /// Returns the sanitization engine name for attestation.
    fn engine_name(&self) -> &str;

    /// Returns the sanitization method label for attestation.
    fn method(&self) -> &str;

    /// Sanitizes a text fragment, returning the result and redaction count.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizeError`] when the engine fails; the caller's
    /// fail-closed policy decides whether the run aborts.
    fn sanitize(&self, text: &str) -> Result<SanitizedText, SanitizeError>;
}
