//! Errors raised while scoring a single comparison.
//!
//! None of these escape the recovering scoring operations; they are logged
//! and replaced by a neutral score. The fallible `try_*` entry points
//! surface them so batch callers can choose their own fallback.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// Frame type absent from the lexical-unit table.
    #[error("frame type not in lexical unit table: {0}")]
    MissingFrame(String),

    /// Sense id absent from the version mapping.
    #[error("sense id not in version mapping: {0}")]
    MissingSense(String),

    /// Sense offset without a canonical name.
    #[error("sense offset has no canonical name: {0}")]
    MissingConcept(String),

    /// Frame type without an embedding vector.
    #[error("no vector for frame type: {0}")]
    MissingVector(String),

    /// Remote similarity provider failed or answered without a score.
    #[error("remote similarity failed: {0}")]
    Remote(String),

    /// Remote element similarity requested but no provider is configured.
    #[error("no remote similarity provider configured")]
    RemoteUnavailable,

    /// The metric produced a value that is not a finite number.
    #[error("non-finite score for {0}")]
    NonFinite(String),

    /// Matrix input contains the same instance id twice.
    #[error("duplicate instance id in matrix input: {0}")]
    DuplicateInstance(String),

    /// Condensed vector length does not match the instance count.
    #[error("condensed matrix for {n} instances needs {expected} entries, got {actual}")]
    MatrixShape {
        n: usize,
        expected: usize,
        actual: usize,
    },

    /// The worker pool could not be created.
    #[error("worker pool: {0}")]
    WorkerPool(String),
}

/// Result type for similarity operations.
pub type SimilarityResult<T> = Result<T, SimilarityError>;
