// crates/docsync-core/src/core/mod.rs
// ============================================================================
// Module: DocSync Core Types
// Description: Canonical DocSync schema and ledger structures.
// Purpose: Provide stable, serializable types for manifests, verdicts, and packs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! DocSync core types define the manifest claim model, verdict records, the
//! hash-chained ledger, and the evidence pack artifact. These types are the
//! canonical source of truth for any derived surfaces.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod chain;
pub mod hashing;
pub mod identifiers;
pub mod manifest;
pub mod pack;
pub mod time;
pub mod verdict;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use chain::ChainEntry;
pub use chain::GENESIS_PREV_HEX;
pub use chain::VerdictRecord;
pub use chain::build_chain;
pub use chain::compute_entry_hash;
pub use chain::genesis_hash;
pub use hashing::DEFAULT_HASH_ALGORITHM;
pub use hashing::HashAlgorithm;
pub use hashing::HashDigest;
pub use identifiers::ClaimId;
pub use identifiers::DocPath;
pub use manifest::Claim;
pub use manifest::DocMode;
pub use manifest::Document;
pub use manifest::EvidenceKind;
pub use manifest::EvidenceRule;
pub use manifest::Manifest;
pub use pack::EvidencePack;
pub use pack::PACK_VERSION;
pub use pack::PackCodecError;
pub use pack::RunnerInfo;
pub use pack::SanitizationAttestation;
pub use time::Timestamp;
pub use verdict::Classification;
pub use verdict::EvidenceRef;
pub use verdict::MAX_SNIPPET_LEN;
pub use verdict::Outcome;
pub use verdict::Verdict;
pub use verdict::classify;
