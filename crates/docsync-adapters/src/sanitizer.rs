// crates/docsync-adapters/src/sanitizer.rs
// ============================================================================
// Module: DocSync Sanitizers
// Description: Deterministic local redaction engines for pack text.
// Purpose: Implement the sanitizer capability for free text in verdicts.
// Dependencies: docsync-core, regex
// ============================================================================

//! ## Overview
//! Sanitizers run upstream of chain construction so redactions are covered
//! by entry hashes. `PatternSanitizer` applies a fixed table of secret
//! patterns deterministically; `PassthroughSanitizer` is the explicit no-op
//! for runs where sanitization is disabled but the pipeline still wants a
//! uniform capability object.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::LazyLock;

use docsync_core::interfaces::SanitizeError;
use docsync_core::interfaces::SanitizedText;
use docsync_core::interfaces::Sanitizer;
use regex::Regex;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Replacement text for redacted fragments.
const REDACTED: &str = "[REDACTED]";

/// Built-in patterns matching common secret formats.
///
/// Kept deliberately small; false positives in evidence snippets are worse
/// than a missed match, since snippets come from source the caller already
/// reads.
static SECRET_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // API keys with common prefixes
        r"sk-[a-zA-Z0-9\-_]{20,}",
        // AWS access keys
        r"AKIA[A-Z0-9]{16}",
        // Bearer tokens in headers
        r"(?i)bearer\s+[a-zA-Z0-9_.=-]{16,}",
        // GitHub tokens
        r"gh[pousr]_[A-Za-z0-9_]{36,}",
        // Private key headers
        r"-----BEGIN\s+(RSA\s+)?PRIVATE\s+KEY-----",
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

// ============================================================================
// SECTION: Pattern Sanitizer
// ============================================================================

/// Deterministic regex-based redaction engine.
#[derive(Debug, Clone)]
pub struct PatternSanitizer {
    /// Compiled redaction patterns applied in order.
    patterns: Vec<Regex>,
}

impl PatternSanitizer {
    /// Creates a sanitizer with the built-in secret patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            patterns: SECRET_PATTERNS.clone(),
        }
    }

    /// Creates a sanitizer with the built-in patterns plus caller extras.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizerBuildError`] when an extra pattern fails to
    /// compile.
    pub fn with_extra_patterns(extra: &[String]) -> Result<Self, SanitizerBuildError> {
        let mut patterns = SECRET_PATTERNS.clone();
        for raw in extra {
            let compiled = Regex::new(raw).map_err(|err| SanitizerBuildError::InvalidPattern {
                pattern: raw.clone(),
                message: err.to_string(),
            })?;
            patterns.push(compiled);
        }
        Ok(Self {
            patterns,
        })
    }
}

impl Default for PatternSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for PatternSanitizer {
    fn engine_name(&self) -> &str {
        "pattern-shield"
    }

    fn method(&self) -> &str {
        "pattern_redaction"
    }

    fn sanitize(&self, text: &str) -> Result<SanitizedText, SanitizeError> {
        let mut output = text.to_string();
        let mut redactions = 0u64;
        for pattern in &self.patterns {
            let count = pattern.find_iter(&output).count() as u64;
            if count > 0 {
                output = pattern.replace_all(&output, REDACTED).into_owned();
                redactions += count;
            }
        }
        Ok(SanitizedText {
            text: output,
            redactions,
        })
    }
}

// ============================================================================
// SECTION: Passthrough Sanitizer
// ============================================================================

/// Explicit no-op sanitizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn engine_name(&self) -> &str {
        "passthrough"
    }

    fn method(&self) -> &str {
        "none"
    }

    fn sanitize(&self, text: &str) -> Result<SanitizedText, SanitizeError> {
        Ok(SanitizedText {
            text: text.to_string(),
            redactions: 0,
        })
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Sanitizer construction errors.
#[derive(Debug, Error)]
pub enum SanitizerBuildError {
    /// An extra redaction pattern failed to compile.
    #[error("invalid redaction pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler error message.
        message: String,
    },
}
