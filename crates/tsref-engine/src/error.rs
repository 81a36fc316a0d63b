//! Error type shared by every query entry point.

use thiserror::Error;

/// Failure modes of a reference query. Cancellation is a normal outcome
/// for interactive hosts, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("operation canceled")]
    Canceled,
    #[error("missing source file: {0}")]
    MissingSourceFile(String),
}

pub type Result<T, E = QueryError> = std::result::Result<T, E>;
