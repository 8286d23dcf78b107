//! # protoframe-similarity
//!
//! Relatedness scores between frame types, frame-element fillers, and
//! whole frame instances, plus the pairwise distance matrix the cluster
//! strategies consume.
//!
//! ## Architecture
//!
//! ```text
//! FrameInstance × FrameInstance
//!        │
//!        ▼
//! SimilarityEngine ── frame types ──► occurrence NPMI | vector cosine
//!        │          └─ fillers ─────► Wu-Palmer | ConceptSimilarity (remote)
//!        │                               │
//!        │                        SimilarityCache (shared, append-only)
//!        ▼
//! DistanceMatrixBuilder (bounded rayon pool) ──► DistanceMatrix (condensed)
//! ```
//!
//! All scores lie in [0,1]. Scoring failures never abort a batch: the
//! recovering operations log and substitute a neutral score, and the
//! matrix builder assigns a failed pair the maximum distance.

#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod frame;
pub mod matrix;
pub mod remote;
pub mod taxonomy;

pub use cache::{CacheKind, SimilarityCache};
pub use config::{ElementMethod, FrameMethod, MatrixConfig, RemoteConfig, SimilarityConfig};
pub use engine::SimilarityEngine;
pub use error::{SimilarityError, SimilarityResult};
pub use matrix::{condensed_index, condensed_len, DistanceMatrix, DistanceMatrixBuilder, SquareMatrix};
pub use remote::{service_key, ConceptSimilarity, NasariClient};
pub use taxonomy::wu_palmer;
