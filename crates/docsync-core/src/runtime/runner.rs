// crates/docsync-core/src/runtime/runner.rs
// ============================================================================
// Module: DocSync Run Pipeline
// Description: Fan-out/fan-in orchestration from manifest to evidence pack.
// Purpose: Evaluate claims in parallel, reduce in canonical order, build chain.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The runner executes the forward path of a verification run: it captures
//! the manifest snapshot hash before any evaluation begins, fans claims out
//! to a bounded worker pool, reduces completed verdicts into canonical
//! (document order, then claim order) sequence regardless of completion
//! order, applies the optional sanitizer to free text, folds the chain, and
//! hands everything to the assembler.
//!
//! Per-claim errors are isolated into skip verdicts; only run-level failures
//! (sanitization under fail-closed, sequencing invariant violations) abort
//! the run, and no partial pack is ever emitted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use thiserror::Error;

use crate::core::chain::VerdictRecord;
use crate::core::chain::build_chain;
use crate::core::hashing::DEFAULT_HASH_ALGORITHM;
use crate::core::hashing::HashAlgorithm;
use crate::core::hashing::HashError;
use crate::core::manifest::Claim;
use crate::core::manifest::DocMode;
use crate::core::manifest::Manifest;
use crate::core::pack::EvidencePack;
use crate::core::pack::RunnerInfo;
use crate::core::pack::SanitizationAttestation;
use crate::core::time::Timestamp;
use crate::interfaces::CodebaseAccessor;
use crate::interfaces::Sanitizer;
use crate::runtime::assembler::AssemblyError;
use crate::runtime::assembler::PackAssembler;
use crate::runtime::assembler::SanitizationPolicy;
use crate::runtime::assembler::SanitizationState;
use crate::runtime::evaluator::ClaimEvaluator;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default worker pool size for claim evaluation.
const DEFAULT_WORKERS: usize = 4;

/// Run pipeline configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Hash algorithm for the snapshot hash and chain entries.
    pub algorithm: HashAlgorithm,
    /// Worker pool size for parallel claim evaluation.
    pub workers: usize,
    /// Optional per-claim evaluation time budget.
    pub claim_timeout: Option<Duration>,
    /// Policy applied when the injected sanitizer fails.
    pub sanitization_policy: SanitizationPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_HASH_ALGORITHM,
            workers: DEFAULT_WORKERS,
            claim_timeout: None,
            sanitization_policy: SanitizationPolicy::default(),
        }
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Executes verification runs from a manifest against a codebase accessor.
#[derive(Debug, Clone, Default)]
pub struct SyncRunner {
    /// Run pipeline configuration.
    config: RunnerConfig,
}

impl SyncRunner {
    /// Creates a new runner with the provided configuration.
    #[must_use]
    pub const fn new(config: RunnerConfig) -> Self {
        Self {
            config,
        }
    }

    /// Runs the full forward path and produces one evidence pack.
    ///
    /// The manifest snapshot hash is computed before any evaluation so a
    /// verifier can confirm the same manifest state was used throughout.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] on run-level failures: invalid manifest,
    /// canonicalization failure, sanitization failure under fail-closed, or
    /// an internal sequencing invariant violation.
    pub fn run<A: CodebaseAccessor>(
        &self,
        manifest: &Manifest,
        accessor: &A,
        sanitizer: Option<&dyn Sanitizer>,
        runner: RunnerInfo,
        timestamp: Timestamp,
    ) -> Result<EvidencePack, RunError> {
        let validation_errors = manifest.validate();
        if !validation_errors.is_empty() {
            return Err(RunError::InvalidManifest(validation_errors.join("; ")));
        }

        let snapshot_hash = manifest.snapshot_hash(self.config.algorithm)?;

        let jobs = flatten_jobs(manifest);
        let mut records = self.evaluate_all(&jobs, accessor)?;

        let sanitization = match sanitizer {
            None => SanitizationState::NotRequested,
            Some(engine) => {
                self.sanitize_records(&mut records, engine)?
            }
        };

        let entries = build_chain(self.config.algorithm, &records)?;

        let assembler = PackAssembler::new(self.config.sanitization_policy);
        let pack = assembler.assemble(snapshot_hash, entries, timestamp, runner, sanitization)?;
        Ok(pack)
    }

    /// Evaluates all claims with a bounded worker pool, reducing results into
    /// canonical order.
    fn evaluate_all(
        &self,
        jobs: &[(DocMode, &Claim)],
        accessor: &(impl CodebaseAccessor + ?Sized),
    ) -> Result<Vec<VerdictRecord>, RunError> {
        let slots: Vec<Mutex<Option<VerdictRecord>>> =
            jobs.iter().map(|_| Mutex::new(None)).collect();
        let cursor = AtomicUsize::new(0);
        let worker_count = self.config.workers.max(1).min(jobs.len().max(1));
        let evaluator = ClaimEvaluator::new(accessor, self.config.claim_timeout);

        std::thread::scope(|scope| {
            for _ in 0..worker_count {
                scope.spawn(|| {
                    loop {
                        let job_index = cursor.fetch_add(1, Ordering::SeqCst);
                        let Some((mode, claim)) = jobs.get(job_index) else {
                            break;
                        };
                        let verdict = evaluator.evaluate(claim);
                        if let Ok(mut slot) = slots[job_index].lock() {
                            *slot = Some(VerdictRecord {
                                verdict,
                                mode: *mode,
                            });
                        }
                    }
                });
            }
        });

        let mut records = Vec::with_capacity(jobs.len());
        for slot in slots {
            let record = slot
                .into_inner()
                .map_err(|_| RunError::Internal("verdict slot mutex poisoned".to_string()))?
                .ok_or_else(|| RunError::Internal("missing verdict slot".to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    /// Applies the sanitizer to verdict reasons and evidence snippets.
    ///
    /// Under fail-closed policy the first failure aborts the run promptly;
    /// under fail-open the failing fragment keeps its original text and the
    /// failure is reported for the pack's sanitization block.
    fn sanitize_records(
        &self,
        records: &mut [VerdictRecord],
        engine: &dyn Sanitizer,
    ) -> Result<SanitizationState, RunError> {
        let fail_closed = self.config.sanitization_policy == SanitizationPolicy::FailClosed;
        let mut total_redactions = 0u64;
        let mut first_error: Option<String> = None;

        for record in records.iter_mut() {
            let mut texts: Vec<&mut String> = Vec::with_capacity(1 + record.verdict.evidence.len());
            texts.push(&mut record.verdict.reason);
            for evidence in &mut record.verdict.evidence {
                texts.push(&mut evidence.snippet);
            }
            for text in texts {
                match engine.sanitize(text) {
                    Ok(sanitized) => {
                        total_redactions += sanitized.redactions;
                        *text = sanitized.text;
                    }
                    Err(err) => {
                        if fail_closed {
                            return Err(RunError::Sanitization(err.to_string()));
                        }
                        if first_error.is_none() {
                            first_error = Some(err.to_string());
                        }
                    }
                }
            }
        }

        Ok(match first_error {
            Some(error) => SanitizationState::Failed {
                engine: engine.engine_name().to_string(),
                method: engine.method().to_string(),
                redaction_count: total_redactions,
                error,
            },
            None => SanitizationState::Applied(SanitizationAttestation {
                engine: engine.engine_name().to_string(),
                method: engine.method().to_string(),
                redaction_count: total_redactions,
                failure: None,
            }),
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Flattens manifest claims into canonical (document, claim) job order.
fn flatten_jobs(manifest: &Manifest) -> Vec<(DocMode, &Claim)> {
    let mut jobs = Vec::with_capacity(manifest.claim_count());
    for doc in &manifest.docs {
        for claim in &doc.claims {
            jobs.push((doc.mode, claim));
        }
    }
    jobs
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Run-level errors. Every variant aborts the run before a pack is emitted.
#[derive(Debug, Error)]
pub enum RunError {
    /// Manifest failed structural validation.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    /// Canonical hashing failed.
    #[error(transparent)]
    Hash(#[from] HashError),
    /// Sanitization failed under fail-closed policy.
    #[error("sanitization failed: {0}")]
    Sanitization(String),
    /// Pack assembly rejected the run outputs.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    /// Internal sequencing invariant violated.
    #[error("internal run invariant violated: {0}")]
    Internal(String),
}
