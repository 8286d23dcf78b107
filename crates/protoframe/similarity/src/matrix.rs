//! Pairwise distance matrices over a group of frame instances.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use protoframe_types::FrameInstance;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::MatrixConfig;
use crate::engine::SimilarityEngine;
use crate::error::{SimilarityError, SimilarityResult};

/// Number of entries in the condensed form of an `n × n` matrix.
pub fn condensed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Position of pair `(i, j)`, `i < j < n`, in the condensed vector.
///
/// Pairs are laid out row-major over the strict upper triangle:
/// (0,1), (0,2), …, (0,n-1), (1,2), …
pub fn condensed_index(n: usize, i: usize, j: usize) -> usize {
    debug_assert!(i < j && j < n);
    n * i - i * (i + 1) / 2 + (j - i - 1)
}

/// Symmetric distance matrix with zero diagonal, stored condensed.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    order: Vec<String>,
    condensed: Vec<f64>,
}

impl DistanceMatrix {
    /// Wrap a condensed vector for instances listed in `order`.
    pub fn from_condensed(order: Vec<String>, condensed: Vec<f64>) -> SimilarityResult<Self> {
        let expected = condensed_len(order.len());
        if condensed.len() != expected {
            return Err(SimilarityError::MatrixShape {
                n: order.len(),
                expected,
                actual: condensed.len(),
            });
        }
        Ok(Self { order, condensed })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Instance ids in matrix order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn condensed(&self) -> &[f64] {
        &self.condensed
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.order.iter().position(|o| o == id)
    }

    /// Distance between instances `i` and `j`, in either order.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.condensed[condensed_index(self.len(), i, j)],
            std::cmp::Ordering::Greater => self.condensed[condensed_index(self.len(), j, i)],
        }
    }

    /// Expand into a full square matrix.
    pub fn square(&self) -> SquareMatrix {
        let n = self.len();
        let mut data = vec![0.0; n * n];
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                data[i * n + j] = self.condensed[k];
                data[j * n + i] = self.condensed[k];
                k += 1;
            }
        }
        SquareMatrix { n, data }
    }
}

/// Dense `n × n` distances, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    n: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

/// Computes distance matrices on a bounded worker pool.
///
/// Distance is `1 - instance_similarity` with `alpha = 0`: inside one
/// frame-type group only the elements discriminate. A pair whose scoring
/// fails gets the maximum distance 1.0; the build itself never fails on a
/// single pair.
pub struct DistanceMatrixBuilder {
    engine: Arc<SimilarityEngine>,
    pool: rayon::ThreadPool,
    workers: usize,
}

impl DistanceMatrixBuilder {
    pub fn new(engine: Arc<SimilarityEngine>, config: &MatrixConfig) -> SimilarityResult<Self> {
        let workers = config.workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("protoframe-matrix-{}", i))
            .build()
            .map_err(|e| SimilarityError::WorkerPool(e.to_string()))?;
        Ok(Self {
            engine,
            pool,
            workers,
        })
    }

    pub fn engine(&self) -> &Arc<SimilarityEngine> {
        &self.engine
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Score every unordered pair of `instances`.
    ///
    /// Instance ids must be unique. Entries are written in condensed order
    /// regardless of which worker finishes first.
    pub fn build(&self, instances: &[FrameInstance]) -> SimilarityResult<DistanceMatrix> {
        let mut seen = HashSet::with_capacity(instances.len());
        for instance in instances {
            if !seen.insert(instance.id.as_str()) {
                return Err(SimilarityError::DuplicateInstance(instance.id.clone()));
            }
        }

        let n = instances.len();
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .collect();
        debug!(instances = n, pairs = pairs.len(), "scoring pairs");

        let failed = AtomicUsize::new(0);
        let match_roles = self.engine.config().match_roles;
        let condensed: Vec<f64> = self.pool.install(|| {
            pairs
                .par_iter()
                .map(|&(i, j)| {
                    let (a, b) = (&instances[i], &instances[j]);
                    match self.engine.try_instance_similarity(a, b, 0.0, match_roles) {
                        Ok(sim) => (1.0 - sim).clamp(0.0, 1.0),
                        Err(e) => {
                            warn!(left = %a.id, right = %b.id, error = %e, "pair scoring failed, using distance 1.0");
                            failed.fetch_add(1, Ordering::Relaxed);
                            1.0
                        }
                    }
                })
                .collect()
        });

        info!(
            instances = n,
            pairs = condensed.len(),
            failed = failed.load(Ordering::Relaxed),
            workers = self.workers,
            "distance matrix built"
        );

        let order = instances.iter().map(|i| i.id.clone()).collect();
        DistanceMatrix::from_condensed(order, condensed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    #[test]
    fn condensed_layout_is_row_major() {
        let n = 4;
        let mut k = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                assert_eq!(condensed_index(n, i, j), k);
                k += 1;
            }
        }
        assert_eq!(k, condensed_len(n));
    }

    #[test]
    fn small_sizes() {
        assert_eq!(condensed_len(0), 0);
        assert_eq!(condensed_len(1), 0);
        assert_eq!(condensed_len(2), 1);
        let m = DistanceMatrix::from_condensed(ids(1), vec![]).unwrap();
        assert_eq!(m.distance(0, 0), 0.0);
        assert_eq!(m.square().size(), 1);
    }

    #[test]
    fn shape_mismatch_rejected() {
        let err = DistanceMatrix::from_condensed(ids(3), vec![0.1, 0.2]).unwrap_err();
        assert_eq!(
            err,
            SimilarityError::MatrixShape {
                n: 3,
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn square_is_symmetric_with_zero_diagonal() {
        let m = DistanceMatrix::from_condensed(ids(3), vec![0.1, 0.2, 0.3]).unwrap();
        let sq = m.square();
        assert_eq!(sq.get(0, 1), 0.1);
        assert_eq!(sq.get(2, 0), 0.2);
        assert_eq!(sq.get(1, 2), 0.3);
        assert_eq!(sq.row(1), &[0.1, 0.0, 0.3]);
        for i in 0..3 {
            assert_eq!(sq.get(i, i), 0.0);
            for j in 0..3 {
                assert_eq!(sq.get(i, j), m.distance(i, j));
            }
        }
        assert_eq!(m.index_of("f2"), Some(2));
        assert_eq!(m.index_of("nope"), None);
    }
}
