//! Curation pipeline errors.

use std::path::PathBuf;

use protoframe_cluster::ClusterError;
use protoframe_lexicon::LexiconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurationError {
    /// A validator or catalog table failed to load.
    #[error("resource load failed: {0}")]
    Resource(#[from] LexiconError),

    /// Prototype selection failed for a frame type.
    #[error("selection failed for {frame_type}: {source}")]
    Selection {
        frame_type: String,
        #[source]
        source: ClusterError,
    },

    /// An annotation pattern failed to compile.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A seed object file is not valid JSON of the expected shape.
    #[error("invalid seed objects in {}: {source}", path.display())]
    Seeds {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A validator needs the lexicon but none was supplied.
    #[error("{0} validator needs the lexicon")]
    LexiconRequired(&'static str),
}

pub type CurationResult<T> = Result<T, CurationError>;
