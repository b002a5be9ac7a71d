// crates/docsync-adapters/src/fs_codebase.rs
// ============================================================================
// Module: DocSync Filesystem Codebase Accessor
// Description: Read-only file walking and pattern search over a repository.
// Purpose: Implement the codebase accessor contract against a local tree.
// Dependencies: docsync-core, ignore, regex, tracing
// ============================================================================

//! ## Overview
//! `FsCodebase` answers codebase queries against a repository root on disk.
//! Walks respect ignore files the way a developer's own tooling would, file
//! order is sorted so repeated runs see identical sequences, and all I/O is
//! read-only. Scopes are repository-relative; anything escaping the root is
//! rejected before touching the filesystem.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use docsync_core::EvidenceKind;
use docsync_core::interfaces::CodebaseAccessor;
use docsync_core::interfaces::SearchError;
use docsync_core::interfaces::SearchMatch;
use ignore::WalkBuilder;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File extensions searched for code evidence.
const CODE_EXTENSIONS: &[&str] = &["rs", "py", "js", "ts", "go", "java", "c", "h", "cpp"];

/// File extensions searched for markdown evidence.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Reject regex patterns longer than this to mitigate ReDoS.
const MAX_PATTERN_LEN: usize = 1000;

// ============================================================================
// SECTION: Accessor
// ============================================================================

/// Filesystem-backed codebase accessor rooted at a repository directory.
#[derive(Debug, Clone)]
pub struct FsCodebase {
    /// Repository root all scopes resolve against.
    root: PathBuf,
}

impl FsCodebase {
    /// Creates an accessor over the provided repository root.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Returns the repository root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a scope against the root, rejecting escapes.
    fn resolve_scope(&self, scope: &str) -> Result<PathBuf, SearchError> {
        if scope.is_empty() {
            return Ok(self.root.clone());
        }
        let relative = Path::new(scope);
        if relative.is_absolute()
            || relative.components().any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(SearchError::InvalidScope(scope.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Walks files of the given kind under a resolved scope, sorted by
    /// repository-relative path.
    fn walk_files(&self, kind: EvidenceKind, scope_path: &Path) -> Vec<PathBuf> {
        let extensions = extensions_for(kind);
        let mut files: Vec<PathBuf> = WalkBuilder::new(scope_path)
            .build()
            .filter_map(Result::ok)
            .map(ignore::DirEntry::into_path)
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();
        files.sort();
        files
    }

    /// Returns the repository-relative form of a path.
    fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.to_string_lossy().replace('\\', "/")
    }
}

impl CodebaseAccessor for FsCodebase {
    fn list_files(&self, kind: EvidenceKind, scope: &str) -> Result<Vec<String>, SearchError> {
        let scope_path = self.resolve_scope(scope)?;
        if !scope_path.exists() {
            return Err(SearchError::ScopeMissing(scope.to_string()));
        }
        Ok(self.walk_files(kind, &scope_path).iter().map(|path| self.relative(path)).collect())
    }

    fn search(
        &self,
        kind: EvidenceKind,
        pattern: &str,
        scope: &str,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        let scope_path = self.resolve_scope(scope)?;
        if !scope_path.exists() {
            return Err(SearchError::ScopeMissing(scope.to_string()));
        }
        let compiled = compile_pattern(pattern)?;

        let mut matches = Vec::new();
        for file in self.walk_files(kind, &scope_path) {
            let Ok(bytes) = std::fs::read(&file) else {
                // Unreadable files are skipped; the scope itself exists.
                continue;
            };
            let contents = String::from_utf8_lossy(&bytes);
            let rel = self.relative(&file);
            for (line_index, line) in contents.lines().enumerate() {
                if compiled.is_match(line) {
                    matches.push(SearchMatch {
                        path: rel.clone(),
                        line: u32::try_from(line_index + 1).unwrap_or(u32::MAX),
                        snippet: line.trim().to_string(),
                    });
                }
            }
        }
        debug!(
            pattern,
            scope,
            kind = kind.as_str(),
            matches = matches.len(),
            "codebase search complete"
        );
        Ok(matches)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the extension filter for an evidence kind.
const fn extensions_for(kind: EvidenceKind) -> &'static [&'static str] {
    match kind {
        EvidenceKind::Code => CODE_EXTENSIONS,
        EvidenceKind::Markdown => MARKDOWN_EXTENSIONS,
        // Unknown kinds never reach the accessor; the evaluator skips them.
        EvidenceKind::Unknown => &[],
    }
}

/// Checks whether a path carries one of the given extensions.
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Compiles a search pattern, rejecting malformed or oversized input.
fn compile_pattern(pattern: &str) -> Result<regex::Regex, SearchError> {
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(SearchError::InvalidPattern(format!(
            "pattern exceeds {MAX_PATTERN_LEN} bytes"
        )));
    }
    regex::Regex::new(pattern).map_err(|err| SearchError::InvalidPattern(err.to_string()))
}
