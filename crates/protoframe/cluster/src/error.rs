//! Cluster-selection errors.
//!
//! Only configuration and input-shape mistakes are errors. A cluster below
//! the minimum size is skipped silently, never reported.

use protoframe_similarity::SimilarityError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Partitional strategy configured with a zero percentage.
    #[error("partitional percentage must be positive")]
    ZeroPercentage,

    /// Frequency strategy configured to keep no groups.
    #[error("frequency top must be positive")]
    ZeroTop,

    /// A matrix-based strategy was built without a distance matrix builder.
    #[error("{0} strategy needs a distance matrix builder")]
    MatrixUnavailable(&'static str),

    /// Distance matrix does not cover the group being clustered.
    #[error("distance matrix covers {actual} instances, group has {expected}")]
    MatrixSize { expected: usize, actual: usize },

    /// Distance matrix construction failed.
    #[error("distance matrix: {0}")]
    Matrix(#[from] SimilarityError),
}

pub type ClusterResult<T> = Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ClusterError::MatrixSize {
            expected: 12,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "distance matrix covers 11 instances, group has 12"
        );
        let err: ClusterError = SimilarityError::DuplicateInstance("f1".into()).into();
        assert_eq!(
            err.to_string(),
            "distance matrix: duplicate instance id in matrix input: f1"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClusterError>();
    }
}
