// crates/docsync-core/src/core/time.rs
// ============================================================================
// Module: DocSync Time Model
// Description: Canonical timestamp representation for evidence packs.
// Purpose: Provide deterministic, replayable time values across DocSync records.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! DocSync embeds explicit time values in evidence packs to keep verification
//! deterministic. The core engine never reads wall-clock time directly; hosts
//! supply timestamps when a run is assembled. Timestamps are informational and
//! excluded from the hash chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp carried in evidence pack metadata.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads wall-clock time.
/// - No validation is performed; monotonicity is a caller responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Timestamp {
    /// Unix epoch milliseconds.
    UnixMillis(i64),
    /// Monotonic logical time value.
    Logical(u64),
}

impl Timestamp {
    /// Returns the timestamp as unix milliseconds when available.
    #[must_use]
    pub const fn as_unix_millis(&self) -> Option<i64> {
        match self {
            Self::UnixMillis(value) => Some(*value),
            Self::Logical(_) => None,
        }
    }

    /// Returns the timestamp as logical time when available.
    #[must_use]
    pub const fn as_logical(&self) -> Option<u64> {
        match self {
            Self::UnixMillis(_) => None,
            Self::Logical(value) => Some(*value),
        }
    }
}
