// crates/docsync-adapters/src/manifest_loader.rs
// ============================================================================
// Module: DocSync Manifest Loader
// Description: Size-limited JSON manifest loading and validation.
// Purpose: Turn manifest files into validated in-memory manifests.
// Dependencies: docsync-core, serde_json
// ============================================================================

//! ## Overview
//! The loader parses manifest files into the core claim model. The core
//! never touches the file format itself; this adapter owns parsing, the
//! input size limit, and structural validation, then hands over a read-only
//! `Manifest`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use docsync_core::Manifest;
use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a manifest file in bytes.
pub const MAX_MANIFEST_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Loads and validates a JSON manifest from disk.
///
/// # Errors
///
/// Returns [`ManifestLoadError`] when the file cannot be read, exceeds the
/// size limit, is not valid JSON, or fails structural validation.
pub fn load_manifest_file(path: &Path) -> Result<Manifest, ManifestLoadError> {
    let bytes =
        std::fs::read(path).map_err(|err| ManifestLoadError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_MANIFEST_BYTES {
        return Err(ManifestLoadError::TooLarge {
            limit: MAX_MANIFEST_BYTES,
            actual: bytes.len(),
        });
    }
    let manifest = parse_manifest_json(&bytes)?;
    debug!(path = %path.display(), docs = manifest.docs.len(), "manifest loaded");
    Ok(manifest)
}

/// Parses and validates a manifest from JSON bytes.
///
/// # Errors
///
/// Returns [`ManifestLoadError`] on parse or validation failure.
pub fn parse_manifest_json(bytes: &[u8]) -> Result<Manifest, ManifestLoadError> {
    let manifest: Manifest =
        serde_json::from_slice(bytes).map_err(|err| ManifestLoadError::Parse(err.to_string()))?;
    let errors = manifest.validate();
    if !errors.is_empty() {
        return Err(ManifestLoadError::Invalid(errors));
    }
    Ok(manifest)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Manifest loading errors.
#[derive(Debug, Error)]
pub enum ManifestLoadError {
    /// Filesystem read failed.
    #[error("failed to read manifest: {0}")]
    Io(String),
    /// The manifest file exceeds the size limit.
    #[error("manifest exceeds size limit ({actual} > {limit} bytes)")]
    TooLarge {
        /// Maximum allowed byte length.
        limit: usize,
        /// Actual file byte length.
        actual: usize,
    },
    /// The manifest is not valid JSON for the expected schema.
    #[error("failed to parse manifest: {0}")]
    Parse(String),
    /// The manifest parsed but failed structural validation.
    #[error("manifest validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
