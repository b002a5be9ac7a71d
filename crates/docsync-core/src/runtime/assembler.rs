// crates/docsync-core/src/runtime/assembler.rs
// ============================================================================
// Module: DocSync Pack Assembler
// Description: Evidence pack assembly with run-level invariant enforcement.
// Purpose: Combine chain entries and run metadata into one pack, fail-closed.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The assembler is the single place a pack comes into existence. It enforces
//! the sequencing invariant (contiguous, duplicate-free indices) and the
//! fail-closed sanitization policy uniformly for the whole run: when
//! sanitization was requested and failed under fail-closed, no pack is
//! produced at all. Partial packs are never emitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::chain::ChainEntry;
use crate::core::hashing::HashDigest;
use crate::core::pack::EvidencePack;
use crate::core::pack::PACK_VERSION;
use crate::core::pack::RunnerInfo;
use crate::core::pack::SanitizationAttestation;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Sanitization Policy
// ============================================================================

/// Policy applied when the injected sanitizer fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SanitizationPolicy {
    /// Abort the run; emit no pack.
    FailClosed,
    /// Proceed with best-effort text and record the failure in the pack.
    #[default]
    FailOpen,
}

/// Sanitization outcome reported by the run pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanitizationState {
    /// No sanitizer was configured for the run.
    NotRequested,
    /// Sanitization ran to completion.
    Applied(SanitizationAttestation),
    /// The sanitizer failed on at least one fragment.
    Failed {
        /// Engine name for attestation.
        engine: String,
        /// Method label for attestation.
        method: String,
        /// Redactions applied to the fragments that did sanitize.
        redaction_count: u64,
        /// First failure message.
        error: String,
    },
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// Assembles evidence packs from chain entries and run metadata.
#[derive(Debug, Clone, Default)]
pub struct PackAssembler {
    /// Policy applied on sanitizer failure.
    policy: SanitizationPolicy,
}

impl PackAssembler {
    /// Creates a new assembler with the provided sanitization policy.
    #[must_use]
    pub const fn new(policy: SanitizationPolicy) -> Self {
        Self {
            policy,
        }
    }

    /// Combines run outputs into one evidence pack.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::IndexInvariant`] when entry indices are
    /// gapped or duplicated (internal invariant violation, fatal) and
    /// [`AssemblyError::SanitizationFailed`] when sanitization failed under
    /// fail-closed policy.
    pub fn assemble(
        &self,
        manifest_snapshot_hash: HashDigest,
        entries: Vec<ChainEntry>,
        timestamp: Timestamp,
        runner: RunnerInfo,
        sanitization: SanitizationState,
    ) -> Result<EvidencePack, AssemblyError> {
        for (position, entry) in entries.iter().enumerate() {
            let expected = position as u64;
            if entry.index != expected {
                return Err(AssemblyError::IndexInvariant {
                    expected,
                    actual: entry.index,
                });
            }
        }

        let sanitization = match sanitization {
            SanitizationState::NotRequested => None,
            SanitizationState::Applied(attestation) => Some(attestation),
            SanitizationState::Failed {
                engine,
                method,
                redaction_count,
                error,
            } => match self.policy {
                SanitizationPolicy::FailClosed => {
                    return Err(AssemblyError::SanitizationFailed(error));
                }
                // Redactions applied before or after the failing fragment are
                // real and hashed into the chain; the attestation must count
                // them and carry the failure rather than claim zero.
                SanitizationPolicy::FailOpen => Some(SanitizationAttestation {
                    engine,
                    method,
                    redaction_count,
                    failure: Some(error),
                }),
            },
        };

        Ok(EvidencePack {
            version: PACK_VERSION.to_string(),
            manifest_snapshot_hash,
            entries,
            timestamp,
            runner,
            sanitization,
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Pack assembly errors. All variants are fatal for the run.
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// Chain entry indices are gapped or duplicated.
    #[error("chain index invariant violated: expected {expected}, found {actual}")]
    IndexInvariant {
        /// Index expected at this position.
        expected: u64,
        /// Index actually present.
        actual: u64,
    },
    /// Sanitization failed under fail-closed policy.
    #[error("sanitization failed under fail-closed policy: {0}")]
    SanitizationFailed(String),
}
