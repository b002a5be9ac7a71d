// crates/docsync-core/src/core/pack.rs
// ============================================================================
// Module: DocSync Evidence Pack
// Description: Evidence pack schema and serialization.
// Purpose: Provide the terminal output artifact of a verification run.
// Dependencies: crate::core::{chain, hashing, time}, serde
// ============================================================================

//! ## Overview
//! An evidence pack wraps the hash-chained ledger with run metadata: the
//! manifest snapshot hash, a timestamp, runner identity, and an optional
//! sanitization attestation. Top-level field names and lowercase-hex digests
//! are part of the compatibility contract across producer and verifier
//! implementations.
//!
//! Timestamp and runner metadata are informational and excluded from the
//! hash chain; only verdict content feeds entry hashes.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::chain::ChainEntry;
use crate::core::hashing::HashDigest;
use crate::core::hashing::canonical_json_bytes;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Current evidence pack schema version.
pub const PACK_VERSION: &str = "1";

// ============================================================================
// SECTION: Metadata Types
// ============================================================================

/// Identity of the tool that produced a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerInfo {
    /// Runner name.
    pub name: String,
    /// Runner version string.
    pub version: String,
}

/// Attestation that sanitization ran upstream of chain construction.
///
/// # Invariants
/// - Present only when sanitization was requested for the run.
/// - `redaction_count` reflects every redaction actually applied, including
///   best-effort runs where the engine failed on some fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizationAttestation {
    /// Sanitization engine name.
    pub engine: String,
    /// Sanitization method label.
    pub method: String,
    /// Total count of redactions applied across the run.
    pub redaction_count: u64,
    /// First engine failure, when the run proceeded best-effort under
    /// fail-open policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

// ============================================================================
// SECTION: Evidence Pack
// ============================================================================

/// The full serialized, hash-chained output of one verification run.
///
/// # Invariants
/// - Immutable terminal artifact of a run; sole input of a verification.
/// - `manifest_snapshot_hash` was computed before any evaluation began.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidencePack {
    /// Pack schema version.
    pub version: String,
    /// Canonical hash of the manifest used for the run.
    pub manifest_snapshot_hash: HashDigest,
    /// Ordered hash-linked ledger entries.
    pub entries: Vec<ChainEntry>,
    /// Informational run timestamp.
    pub timestamp: Timestamp,
    /// Identity of the producing tool.
    pub runner: RunnerInfo,
    /// Sanitization attestation, when sanitization was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitization: Option<SanitizationAttestation>,
}

impl EvidencePack {
    /// Serializes the pack to its canonical JSON byte form.
    ///
    /// # Errors
    ///
    /// Returns [`PackCodecError`] when canonicalization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, PackCodecError> {
        canonical_json_bytes(self).map_err(|err| PackCodecError::Serialize(err.to_string()))
    }

    /// Deserializes a pack from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PackCodecError`] when the bytes are not a valid pack.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PackCodecError> {
        serde_json::from_slice(bytes).map_err(|err| PackCodecError::Deserialize(err.to_string()))
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Evidence pack serialization errors.
#[derive(Debug, Error)]
pub enum PackCodecError {
    /// Canonical serialization failed.
    #[error("failed to serialize evidence pack: {0}")]
    Serialize(String),
    /// Deserialization failed or the payload is malformed.
    #[error("failed to deserialize evidence pack: {0}")]
    Deserialize(String),
}
