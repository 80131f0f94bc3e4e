//! Error types for engram.
//!
//! All errors are strongly typed using thiserror. This enables pattern
//! matching on specific failure conditions and keeps "no result" outcomes
//! distinguishable from genuinely empty result sets.

use thiserror::Error;

/// Validation errors raised when an operation is given malformed input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A belief must carry a non-empty name.
    #[error("Belief name cannot be empty")]
    EmptyBeliefName,

    /// A percept must carry a non-empty kind.
    #[error("Percept kind cannot be empty")]
    EmptyPerceptKind,

    /// A percept must carry a non-empty object id.
    #[error("Percept object id cannot be empty")]
    EmptyObjectId,

    /// A time threshold string could not be parsed.
    #[error("Invalid timestamp: {input:?}")]
    InvalidTimestamp {
        /// The unparseable input.
        input: String,
    },
}

/// Errors raised while saving or restoring a belief snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// File I/O failed.
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot file exists but its contents are not a valid snapshot.
    #[error("Corrupt snapshot: {reason}")]
    Corrupt {
        /// What was wrong with the snapshot.
        reason: String,
    },
}

impl SnapshotError {
    /// Creates a corrupt-snapshot error.
    #[must_use]
    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self::Corrupt {
            reason: reason.into(),
        }
    }
}

/// Top-level error type for memory operations.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Snapshot save/restore failure.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// A recall that required at least one match found none.
    #[error("No matching fact found")]
    NotFound,

    /// A recall that required exactly one match found several.
    #[error("Expected a single matching fact, found {matches}")]
    Ambiguous {
        /// How many facts matched.
        matches: usize,
    },

    /// Internal invariant failure (e.g. a poisoned lock).
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },
}

impl MemoryError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a snapshot error.
    #[must_use]
    pub const fn is_snapshot(&self) -> bool {
        matches!(self, Self::Snapshot(_))
    }

    /// Returns true if this is a zero-match recall failure.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Returns true if this is a multiple-match recall failure.
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

/// Result type alias for memory operations.
pub type MemoryResult<T> = Result<T, MemoryError>;
