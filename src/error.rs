//! Error types for query building and compilation.

use thiserror::Error;

/// Errors produced while building or compiling a [`crate::query::Query`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    /// A value supplied to a builder method was not acceptable for the field it targets.
    #[error("invalid input for field '{field}'")]
    InvalidInput { field: &'static str },

    /// A variadic or list-shaped call received the wrong number of arguments.
    #[error("arity mismatch: expected {expected}, got {got}")]
    Arity { expected: usize, got: usize },

    /// The query is not in a state that permits the requested operation.
    #[error("invalid query state")]
    InvalidState,

    /// Predicate groups opened with `begin_group` were not closed before compilation.
    #[error("unbalanced predicate groups")]
    Unbalanced,

    /// The requested operation has no representation in the target dialect.
    #[error("operation not supported by dialect")]
    UnsupportedDialect,

    /// The compiler reached a state that should be unreachable given the invariants
    /// upheld by the builder. Indicates a bug rather than misuse.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(&'static str),
}

/// Convenience alias used throughout the crate.
pub type QueryResult<T> = Result<T, QueryError>;
