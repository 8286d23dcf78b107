//! Memoization of pairwise relatedness scores.

use dashmap::DashMap;

/// Which metric a cached score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    FrameOccurrence,
    FrameVector,
    ElementTaxonomic,
    ElementRemote,
}

/// Append-only cache of scores for unordered key pairs.
///
/// Lookups try both orderings. Identical keys are answered with 1.0
/// without touching the map. Concurrent writers of the same pair store
/// the same deterministic value, so last-write-wins is harmless.
#[derive(Debug, Default)]
pub struct SimilarityCache {
    scores: DashMap<(CacheKind, String, String), f64>,
}

impl SimilarityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: CacheKind, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        self.scores
            .get(&(kind, a.to_string(), b.to_string()))
            .or_else(|| self.scores.get(&(kind, b.to_string(), a.to_string())))
            .map(|entry| *entry.value())
    }

    pub fn insert(&self, kind: CacheKind, a: &str, b: &str, score: f64) {
        if a == b {
            return;
        }
        self.scores.insert((kind, a.to_string(), b.to_string()), score);
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
