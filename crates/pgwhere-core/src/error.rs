//! Error types for `pgwhere`.
//!
//! Every failure is reported synchronously to the caller. Compilation is pure and
//! deterministic, so nothing here is retried or recovered internally: the first
//! error in depth-first order aborts the whole compile.

use thiserror::Error;

use crate::detect::FieldTypeFamily;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors that can occur while compiling a filter tree.
///
/// Error codes follow the pattern `PGW-XXX` so API layers can map them
/// to client-visible "invalid filter" responses.
#[derive(Error, Debug)]
pub enum CompileError {
    /// No registered strategy declares the operator for the detected family (PGW-001).
    #[error("[PGW-001] Operator '{operator}' is not supported for field '{field}' ({family})")]
    UnsupportedOperator {
        /// Field the operator was applied to.
        field: String,
        /// Operator name as received.
        operator: String,
        /// Family detected for the field.
        family: FieldTypeFamily,
    },

    /// Value does not have the shape the operator requires (PGW-002).
    #[error("[PGW-002] Type mismatch on '{field}': expected {expected}, got {got}")]
    TypeMismatch {
        /// Field (or tree position) that carried the value.
        field: String,
        /// Expected shape.
        expected: String,
        /// Received shape.
        got: String,
    },

    /// Value failed family-specific parsing (PGW-003).
    #[error("[PGW-003] Malformed literal for '{field}': {value} ({reason})")]
    MalformedLiteral {
        /// Field the literal was bound to.
        field: String,
        /// Raw value as received.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A non-root combinator group had no children (PGW-004).
    #[error("[PGW-004] Empty group at '{path}'")]
    EmptyGroup {
        /// Position of the group in the filter tree, e.g. `AND[1].OR`.
        path: String,
    },

    /// The filter tree exceeds a configured complexity limit (PGW-005).
    #[error("[PGW-005] Filter too complex: {what} is {actual}, limit is {limit}")]
    TooComplex {
        /// Which dimension tripped the guard.
        what: &'static str,
        /// Configured limit.
        limit: usize,
        /// Observed value.
        actual: usize,
    },

    /// A field reference cannot be rendered as a JSON path (PGW-006).
    #[error("[PGW-006] Invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// Offending path, dotted.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Filter text is not valid JSON (PGW-007).
    #[error("[PGW-007] Filter is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    /// Returns the error code (e.g., "PGW-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedOperator { .. } => "PGW-001",
            Self::TypeMismatch { .. } => "PGW-002",
            Self::MalformedLiteral { .. } => "PGW-003",
            Self::EmptyGroup { .. } => "PGW-004",
            Self::TooComplex { .. } => "PGW-005",
            Self::InvalidFieldPath { .. } => "PGW-006",
            Self::Json(_) => "PGW-007",
        }
    }

    /// Returns the field the error refers to, when there is one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnsupportedOperator { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::MalformedLiteral { field, .. } => Some(field),
            Self::InvalidFieldPath { path, .. } => Some(path),
            Self::EmptyGroup { .. } | Self::TooComplex { .. } | Self::Json(_) => None,
        }
    }

    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    pub(crate) fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedLiteral {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}
