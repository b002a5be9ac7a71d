// crates/docsync-core/src/runtime/mod.rs
// ============================================================================
// Module: DocSync Runtime
// Description: Run pipeline, evaluation, assembly, and verification helpers.
// Purpose: Provide the forward run path and the offline verification path.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime layer orchestrates deterministic verification runs over the
//! core types: parallel claim evaluation, ordered chain reduction, pack
//! assembly, and self-contained pack verification.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod assembler;
pub mod evaluator;
pub mod runner;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembler::AssemblyError;
pub use assembler::PackAssembler;
pub use assembler::SanitizationPolicy;
pub use assembler::SanitizationState;
pub use evaluator::ClaimEvaluator;
pub use runner::RunError;
pub use runner::RunnerConfig;
pub use runner::SyncRunner;
pub use verifier::ChainFault;
pub use verifier::FaultReason;
pub use verifier::PackVerifier;
pub use verifier::VerificationReport;
pub use verifier::VerificationStatus;
