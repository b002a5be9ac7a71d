// crates/docsync-core/tests/evaluator.rs
// ============================================================================
// Module: Evaluator Tests
// Description: Tests for per-claim evidence evaluation.
// ============================================================================
//! ## Overview
//! Validates conjunctive rule semantics, skip handling for unevaluable
//! rules, and the fail-over-skip precedence for mixed results.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::time::Duration;

use docsync_core::Claim;
use docsync_core::ClaimEvaluator;
use docsync_core::ClaimId;
use docsync_core::CodebaseAccessor;
use docsync_core::EvidenceKind;
use docsync_core::EvidenceRule;
use docsync_core::Outcome;
use docsync_core::SearchError;
use docsync_core::SearchMatch;

// ============================================================================
// SECTION: In-Memory Codebase
// ============================================================================

/// In-memory codebase: a list of (path, contents) files searched by
/// substring.
struct MemoryCodebase {
    /// Files keyed by repository-relative path.
    files: Vec<(String, String)>,
}

impl MemoryCodebase {
    fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(path, contents)| ((*path).to_string(), (*contents).to_string()))
                .collect(),
        }
    }

    fn scope_exists(&self, scope: &str) -> bool {
        scope.is_empty() || self.files.iter().any(|(path, _)| path.starts_with(scope))
    }
}

impl CodebaseAccessor for MemoryCodebase {
    fn list_files(&self, _kind: EvidenceKind, scope: &str) -> Result<Vec<String>, SearchError> {
        if !self.scope_exists(scope) {
            return Err(SearchError::ScopeMissing(scope.to_string()));
        }
        Ok(self
            .files
            .iter()
            .filter(|(path, _)| scope.is_empty() || path.starts_with(scope))
            .map(|(path, _)| path.clone())
            .collect())
    }

    fn search(
        &self,
        _kind: EvidenceKind,
        pattern: &str,
        scope: &str,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        if !self.scope_exists(scope) {
            return Err(SearchError::ScopeMissing(scope.to_string()));
        }
        let mut matches = Vec::new();
        for (path, contents) in &self.files {
            if !scope.is_empty() && !path.starts_with(scope) {
                continue;
            }
            for (line_index, line) in contents.lines().enumerate() {
                if line.contains(pattern) {
                    matches.push(SearchMatch {
                        path: path.clone(),
                        line: u32::try_from(line_index + 1).unwrap(),
                        snippet: line.trim().to_string(),
                    });
                }
            }
        }
        Ok(matches)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a claim with the given evidence rules.
fn claim(id: &str, rules: Vec<EvidenceRule>) -> Claim {
    Claim {
        id: ClaimId::new(id),
        text: format!("assertion {id}"),
        evidence: rules,
    }
}

/// Builds a code evidence rule.
fn rule(pattern: &str, scope: &str) -> EvidenceRule {
    EvidenceRule {
        kind: EvidenceKind::Code,
        pattern: pattern.to_string(),
        scope: scope.to_string(),
    }
}

/// Returns a codebase with one source file containing retry logic.
fn codebase() -> MemoryCodebase {
    MemoryCodebase::new(&[
        ("src/retry.rs", "fn retry_with_backoff() {\n    exponential_backoff();\n}\n"),
        ("src/client.rs", "fn connect() {}\n"),
    ])
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Tests a claim passes when every rule finds a match.
#[test]
fn test_all_rules_matching_pass() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "retry-claim",
        vec![rule("retry_with_backoff", "src"), rule("exponential_backoff", "src")],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Pass);
    assert_eq!(verdict.reason, "2/2 evidence rules satisfied");
    assert!(!verdict.evidence.is_empty());
}

/// Tests conjunctive semantics: one unmatched rule fails the claim even when
/// another rule matched.
#[test]
fn test_one_unmatched_rule_fails_claim() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "retry-claim",
        vec![rule("retry_with_backoff", "src"), rule("circuit_breaker", "src")],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Fail);
    assert!(verdict.reason.contains("rule 1"));
    assert!(verdict.reason.contains("circuit_breaker"));
}

/// Tests matched evidence is still attached to a failing verdict.
#[test]
fn test_failing_claim_keeps_partial_evidence() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "retry-claim",
        vec![rule("retry_with_backoff", "src"), rule("circuit_breaker", "src")],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Fail);
    assert_eq!(verdict.evidence.len(), 1);
    assert_eq!(verdict.evidence[0].path, "src/retry.rs");
}

/// Tests a claim with zero rules resolves to skip, never pass.
#[test]
fn test_zero_rules_skip() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim("empty-claim", Vec::new());

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Skip);
    assert_eq!(verdict.reason, "claim defines no evidence rules");
}

// ============================================================================
// SECTION: Skip Causes
// ============================================================================

/// Tests a missing scope resolves to skip with the scope named.
#[test]
fn test_missing_scope_skip() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim("scoped-claim", vec![rule("retry_with_backoff", "nonexistent")]);

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Skip);
    assert!(verdict.reason.contains("scope 'nonexistent' not found"));
}

/// Tests an unrecognized evidence kind resolves to skip.
#[test]
fn test_unknown_kind_skip() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "kind-claim",
        vec![EvidenceRule {
            kind: EvidenceKind::Unknown,
            pattern: "anything".to_string(),
            scope: String::new(),
        }],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Skip);
    assert!(verdict.reason.contains("unrecognized evidence kind"));
}

/// Tests a definitive rule failure outranks skip causes in mixed claims,
/// while the unevaluable rules stay reported in the reason.
#[test]
fn test_fail_outranks_skip() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "mixed-claim",
        vec![rule("circuit_breaker", "src"), rule("retry_with_backoff", "nonexistent")],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Fail);
    assert!(verdict.reason.contains("no matches for pattern 'circuit_breaker'"));
    assert!(verdict.reason.contains("scope 'nonexistent' not found"));
}

/// Tests an exhausted time budget resolves the claim to skip with a timeout
/// reason instead of failing or hanging.
#[test]
fn test_exhausted_budget_skips_with_timeout_reason() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, Some(Duration::ZERO));
    let claim = claim("slow-claim", vec![rule("retry_with_backoff", "src")]);

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Skip);
    assert!(verdict.reason.contains("timed out"));
    assert!(verdict.evidence.is_empty());
}

/// Tests multiple skip causes are all reported.
#[test]
fn test_multiple_skip_causes_reported() {
    let codebase = codebase();
    let evaluator = ClaimEvaluator::new(&codebase, None);
    let claim = claim(
        "skippy-claim",
        vec![rule("a", "missing-one"), rule("b", "missing-two")],
    );

    let verdict = evaluator.evaluate(&claim);

    assert_eq!(verdict.outcome, Outcome::Skip);
    assert!(verdict.reason.contains("missing-one"));
    assert!(verdict.reason.contains("missing-two"));
}
