// crates/docsync-core/tests/end_to_end.rs
// ============================================================================
// Module: End-to-End Tests
// Description: Full pipeline test from manifest JSON to verified pack.
// ============================================================================
//! ## Overview
//! Exercises the whole forward path in one pass: a manifest deserialized
//! from JSON, a run over an in-memory codebase, classification of the
//! resulting entry, determinism across repeated runs, the canonical JSON
//! round trip, and offline verification of the emitted pack.

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

use docsync_core::Classification;
use docsync_core::CodebaseAccessor;
use docsync_core::EvidenceKind;
use docsync_core::EvidencePack;
use docsync_core::Manifest;
use docsync_core::Outcome;
use docsync_core::PackVerifier;
use docsync_core::RunnerConfig;
use docsync_core::RunnerInfo;
use docsync_core::SearchError;
use docsync_core::SearchMatch;
use docsync_core::SyncRunner;
use docsync_core::Timestamp;
use docsync_core::classify;
use docsync_core::hashing::DEFAULT_HASH_ALGORITHM;

// ============================================================================
// SECTION: In-Memory Codebase
// ============================================================================

/// In-memory codebase searched by substring.
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
// SECTION: Fixtures
// ============================================================================

/// Manifest JSON with one spec-first document asserting authenticated
/// endpoints.
const MANIFEST_JSON: &str = r#"{
  "version": "1",
  "docs": [
    {
      "path": "docs/architecture.md",
      "mode": "spec-first",
      "claims": [
        {
          "id": "ARCH-001",
          "text": "All API endpoints require authentication",
          "evidence": [
            { "kind": "code", "pattern": "require_auth", "scope": "src/api" }
          ]
        }
      ]
    }
  ]
}"#;

/// Returns the codebase backing the manifest's claim.
fn codebase() -> MemoryCodebase {
    MemoryCodebase::new(&[
        ("src/api/handlers.rs", "fn list_users(ctx: &Ctx) {\n    require_auth(ctx);\n}\n"),
        ("src/main.rs", "fn main() {}\n"),
    ])
}

/// Fixed run metadata.
fn run_metadata() -> (RunnerInfo, Timestamp) {
    (
        RunnerInfo {
            name: "docsync".to_string(),
            version: "0.1.0".to_string(),
        },
        Timestamp::UnixMillis(1_700_000_000_000),
    )
}

// ============================================================================
// SECTION: Full Pipeline
// ============================================================================

/// Tests the full pipeline: a manifest parsed from JSON runs against a
/// codebase, the backed claim passes and classifies as satisfied, repeated
/// runs produce identical entry hashes, and the serialized pack verifies
/// offline after a canonical JSON round trip.
#[test]
fn test_manifest_json_to_verified_pack() {
    let manifest: Manifest = serde_json::from_str(MANIFEST_JSON).unwrap();
    let (runner_info, timestamp) = run_metadata();
    let runner = SyncRunner::new(RunnerConfig::default());
    let codebase = codebase();

    let pack = runner
        .run(&manifest, &codebase, None, runner_info.clone(), timestamp)
        .unwrap();

    assert_eq!(pack.entries.len(), 1);
    let entry = &pack.entries[0];
    assert_eq!(entry.claim_id.as_str(), "ARCH-001");
    assert_eq!(entry.outcome, Outcome::Pass);
    assert_eq!(classify(entry.outcome, entry.mode), Classification::Satisfied);
    assert_eq!(entry.evidence_refs[0].path, "src/api/handlers.rs");

    let rerun = runner.run(&manifest, &codebase, None, runner_info, timestamp).unwrap();
    assert_eq!(rerun.entries[0].entry_hash, entry.entry_hash);

    let bytes = pack.to_canonical_json().unwrap();
    let reloaded = EvidencePack::from_json(&bytes).unwrap();
    assert_eq!(reloaded, pack);

    let report = PackVerifier::new(DEFAULT_HASH_ALGORITHM).verify(&reloaded);
    assert!(report.is_valid());
    assert_eq!(report.verified_entries, 1);
}

/// Tests the spec-first failure path end to end: when the codebase lacks the
/// asserted marker, the claim fails and classifies as a violation, and the
/// pack still verifies offline.
#[test]
fn test_unbacked_claim_classifies_violation_and_verifies() {
    let manifest: Manifest = serde_json::from_str(MANIFEST_JSON).unwrap();
    let (runner_info, timestamp) = run_metadata();
    let runner = SyncRunner::new(RunnerConfig::default());
    let codebase = MemoryCodebase::new(&[("src/api/handlers.rs", "fn list_users() {}\n")]);

    let pack = runner.run(&manifest, &codebase, None, runner_info, timestamp).unwrap();

    let entry = &pack.entries[0];
    assert_eq!(entry.outcome, Outcome::Fail);
    assert_eq!(classify(entry.outcome, entry.mode), Classification::Violation);

    let report = PackVerifier::new(DEFAULT_HASH_ALGORITHM).verify(&pack);
    assert!(report.is_valid());
}
