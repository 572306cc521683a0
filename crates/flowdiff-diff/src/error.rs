//! Error types for the diff crate.

use flowdiff_types::TypeError;

/// Errors that can occur while preparing inputs for a diff.
///
/// The comparison functions themselves are total; only serialization of a
/// definition into its canonical text form can fail.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A definition could not be serialized to canonical text.
    #[error("serialization error: {0}")]
    Serialization(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
