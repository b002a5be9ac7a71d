// crates/docsync-adapters/src/lib.rs
// ============================================================================
// Module: DocSync Adapters Library
// Description: Filesystem, manifest, and sanitizer adapters for DocSync.
// Purpose: Bind the core engine interfaces to concrete local implementations.
// Dependencies: docsync-core, ignore, regex, serde_json, tracing
// ============================================================================

//! ## Overview
//! Adapters implement the core engine's external collaborator interfaces
//! against concrete backends: a read-only filesystem codebase accessor, a
//! size-limited JSON manifest loader, and deterministic sanitizers. The core
//! crate stays free of file formats and filesystem details; everything
//! environment-specific lives here.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fs_codebase;
pub mod manifest_loader;
pub mod sanitizer;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fs_codebase::FsCodebase;
pub use manifest_loader::MAX_MANIFEST_BYTES;
pub use manifest_loader::ManifestLoadError;
pub use manifest_loader::load_manifest_file;
pub use manifest_loader::parse_manifest_json;
pub use sanitizer::PassthroughSanitizer;
pub use sanitizer::PatternSanitizer;
pub use sanitizer::SanitizerBuildError;
