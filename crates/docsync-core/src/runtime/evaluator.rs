// crates/docsync-core/src/runtime/evaluator.rs
// ============================================================================
// Module: DocSync Claim Evaluator
// Description: Per-claim evidence evaluation against a codebase accessor.
// Purpose: Resolve evidence rules into exactly one pass/fail/skip verdict.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The evaluator resolves one claim's evidence rules against a read-only
//! codebase accessor. Rules combine with AND semantics: a claim passes only
//! when every rule finds at least one match. A rule whose scope exists but
//! matches nothing fails the claim; a rule that cannot be evaluated at all
//! (missing scope, bad pattern, unknown kind, timeout) contributes a skip
//! cause instead.
//!
//! Precedence when rule results are mixed: a definitive rule failure wins
//! over skip causes, because under AND semantics the claim is conclusively
//! unsatisfied regardless of the unevaluable rules.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::Instant;

use crate::core::manifest::Claim;
use crate::core::manifest::EvidenceKind;
use crate::core::verdict::EvidenceRef;
use crate::core::verdict::Outcome;
use crate::core::verdict::Verdict;
use crate::interfaces::CodebaseAccessor;
use crate::interfaces::SearchError;

// ============================================================================
// SECTION: Evaluator
// ============================================================================

/// Evaluates claims against a codebase accessor.
///
/// Evaluation is read-only and safe to run concurrently across independent
/// claims; no claim's evaluation observes another claim's result.
pub struct ClaimEvaluator<'a, A: CodebaseAccessor + ?Sized> {
    /// Read-only codebase query interface.
    accessor: &'a A,
    /// Optional per-claim time budget.
    timeout: Option<Duration>,
}

impl<'a, A: CodebaseAccessor + ?Sized> ClaimEvaluator<'a, A> {
    /// Creates a new evaluator over the provided accessor.
    #[must_use]
    pub const fn new(accessor: &'a A, timeout: Option<Duration>) -> Self {
        Self {
            accessor,
            timeout,
        }
    }

    /// Evaluates a single claim into exactly one verdict.
    ///
    /// A claim with zero evidence rules is a configuration error and is
    /// reported as skip with an explicit reason, never silently passed.
    #[must_use]
    pub fn evaluate(&self, claim: &Claim) -> Verdict {
        if claim.evidence.is_empty() {
            return Verdict {
                claim_id: claim.id.clone(),
                outcome: Outcome::Skip,
                evidence: Vec::new(),
                reason: "claim defines no evidence rules".to_string(),
            };
        }

        let started = Instant::now();
        let mut refs: Vec<EvidenceRef> = Vec::new();
        let mut failures: Vec<String> = Vec::new();
        let mut skip_causes: Vec<String> = Vec::new();
        let mut satisfied = 0usize;

        for (rule_index, rule) in claim.evidence.iter().enumerate() {
            if let Some(budget) = self.timeout
                && started.elapsed() >= budget
            {
                skip_causes.push(format!(
                    "evidence search timed out after {}ms",
                    budget.as_millis()
                ));
                break;
            }
            if rule.kind == EvidenceKind::Unknown {
                skip_causes.push(format!("rule {rule_index}: unrecognized evidence kind"));
                continue;
            }
            match self.accessor.search(rule.kind, &rule.pattern, &rule.scope) {
                Ok(matches) if matches.is_empty() => {
                    failures.push(format!(
                        "rule {rule_index}: no matches for pattern '{}' in scope '{}'",
                        rule.pattern, rule.scope
                    ));
                }
                Ok(matches) => {
                    satisfied += 1;
                    refs.extend(matches.into_iter().map(|found| {
                        EvidenceRef::new(rule.kind, found.path, found.line, &found.snippet)
                    }));
                }
                Err(SearchError::ScopeMissing(scope)) => {
                    skip_causes.push(format!("rule {rule_index}: scope '{scope}' not found"));
                }
                Err(SearchError::InvalidScope(scope)) => {
                    skip_causes.push(format!("rule {rule_index}: invalid scope '{scope}'"));
                }
                Err(SearchError::InvalidPattern(message)) => {
                    skip_causes.push(format!("rule {rule_index}: invalid pattern: {message}"));
                }
                Err(SearchError::Access(message)) => {
                    skip_causes.push(format!("rule {rule_index}: codebase access failed: {message}"));
                }
            }
        }

        let (outcome, reason) = if !failures.is_empty() {
            // Unevaluable rules do not change a conclusive failure, but their
            // causes stay in the reason so the verdict remains auditable.
            let mut causes = failures;
            causes.append(&mut skip_causes);
            (Outcome::Fail, causes.join("; "))
        } else if !skip_causes.is_empty() {
            (Outcome::Skip, skip_causes.join("; "))
        } else {
            (
                Outcome::Pass,
                format!("{satisfied}/{} evidence rules satisfied", claim.evidence.len()),
            )
        };

        Verdict {
            claim_id: claim.id.clone(),
            outcome,
            evidence: refs,
            reason,
        }
    }
}
