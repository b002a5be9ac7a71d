// crates/docsync-core/src/lib.rs
// ============================================================================
// Module: DocSync Core Library
// Description: Public API surface for the DocSync evidence pack engine.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! DocSync core provides deterministic claim evaluation, hash-chained ledger
//! construction, and self-contained pack verification. It is backend-agnostic
//! and integrates with codebases and sanitizers through explicit interfaces
//! rather than embedding file-format or transport details.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CodebaseAccessor;
pub use interfaces::SanitizeError;
pub use interfaces::SanitizedText;
pub use interfaces::Sanitizer;
pub use interfaces::SearchError;
pub use interfaces::SearchMatch;
pub use runtime::AssemblyError;
pub use runtime::ChainFault;
pub use runtime::ClaimEvaluator;
pub use runtime::FaultReason;
pub use runtime::PackAssembler;
pub use runtime::PackVerifier;
pub use runtime::RunError;
pub use runtime::RunnerConfig;
pub use runtime::SanitizationPolicy;
pub use runtime::SanitizationState;
pub use runtime::SyncRunner;
pub use runtime::VerificationReport;
pub use runtime::VerificationStatus;
