//! Resource loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// A static table could not be loaded. Always fatal for engine construction.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The file could not be opened or read.
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line has the wrong shape.
    #[error("{path}:{line}: {reason}")]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A vector line has an unparsable component or a wrong dimension.
    #[error("{path}:{line}: invalid vector: {reason}")]
    InvalidVector {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The hypernym table contains a cycle through this node.
    #[error("hypernym cycle through {0}")]
    TaxonomyCycle(String),
}

/// Result type for lexicon operations.
pub type LexiconResult<T> = Result<T, LexiconError>;
