//! Prototype selection strategies.
//!
//! All strategies reduce one frame-type group to a [`Prototypes`] map keyed
//! by the representative instance id, so callers never depend on which one
//! ran.

use std::collections::HashMap;
use std::sync::Arc;

use protoframe_similarity::{DistanceMatrixBuilder, SquareMatrix};
use protoframe_types::{CanonicalSignature, FrameInstance, PrototypeRecord, Prototypes};
use tracing::debug;

use crate::cluster::Cluster;
use crate::config::{SelectionConfig, StrategyKind};
use crate::error::{ClusterError, ClusterResult};
use crate::kmedoids::k_medoids;
use crate::linkage::average_linkage;

/// Picks representative instances from a group of instances.
pub trait PrototypeSelector: Send + Sync {
    fn name(&self) -> &'static str;

    /// Select prototypes from `group`. Input order is significant for
    /// tie-breaks.
    fn select(&self, group: &[FrameInstance]) -> ClusterResult<Prototypes>;
}

fn record(instance: &FrameInstance) -> (String, PrototypeRecord) {
    (instance.id.clone(), PrototypeRecord::from(instance))
}

// ── Frequency ──────────────────────────────────────────────────────────

/// Keeps the first member of each of the `top` most populous canonical
/// signature groups.
#[derive(Debug, Clone)]
pub struct FrequencySelector {
    top: usize,
}

impl FrequencySelector {
    pub fn new(top: usize) -> ClusterResult<Self> {
        if top == 0 {
            return Err(ClusterError::ZeroTop);
        }
        Ok(Self { top })
    }
}

impl PrototypeSelector for FrequencySelector {
    fn name(&self) -> &'static str {
        "frequency"
    }

    fn select(&self, group: &[FrameInstance]) -> ClusterResult<Prototypes> {
        // signature -> (first index, count)
        let mut buckets: HashMap<CanonicalSignature, (usize, usize)> = HashMap::new();
        for (idx, instance) in group.iter().enumerate() {
            buckets
                .entry(CanonicalSignature::from(instance))
                .or_insert((idx, 0))
                .1 += 1;
        }

        let mut ranked: Vec<(usize, usize)> = buckets.into_values().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        debug!(
            instances = group.len(),
            signatures = ranked.len(),
            top = self.top,
            "frequency selection"
        );

        Ok(ranked
            .into_iter()
            .take(self.top)
            .map(|(first, _)| record(&group[first]))
            .collect())
    }
}

// ── Hierarchical ───────────────────────────────────────────────────────

/// Average-linkage agglomeration cut at a distance threshold; the medoid of
/// every large enough cluster is a prototype.
pub struct HierarchicalSelector {
    matrix: Arc<DistanceMatrixBuilder>,
    cut_threshold: f64,
    min_cluster_size: usize,
}

impl HierarchicalSelector {
    pub fn new(matrix: Arc<DistanceMatrixBuilder>, cut_threshold: f64, min_cluster_size: usize) -> Self {
        Self {
            matrix,
            cut_threshold,
            min_cluster_size,
        }
    }

    /// Flat clusters of `group` with their medoids resolved.
    pub fn clusters(&self, group: &[FrameInstance]) -> ClusterResult<Vec<Cluster>> {
        let distances = distances(&self.matrix, group)?;
        let labels = average_linkage(&distances).cut(self.cut_threshold);
        let mut clusters = Cluster::from_labels(&labels);
        for cluster in clusters.iter_mut() {
            if cluster.len() >= self.min_cluster_size {
                cluster.resolve_medoid(&distances);
            }
        }
        Ok(clusters)
    }
}

impl PrototypeSelector for HierarchicalSelector {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn select(&self, group: &[FrameInstance]) -> ClusterResult<Prototypes> {
        let clusters = self.clusters(group)?;
        let kept: Prototypes = clusters
            .iter()
            .filter_map(|c| c.medoid)
            .map(|m| record(&group[m]))
            .collect();

        debug!(
            instances = group.len(),
            clusters = clusters.len(),
            prototypes = kept.len(),
            threshold = self.cut_threshold,
            "hierarchical selection"
        );
        Ok(kept)
    }
}

// ── Partitional ────────────────────────────────────────────────────────

/// k-medoids with `k = ceil(n / percentage) + 1`; the medoids are the
/// prototypes.
pub struct PartitionalSelector {
    matrix: Arc<DistanceMatrixBuilder>,
    percentage: usize,
    max_iter: usize,
    seed: u64,
}

impl PartitionalSelector {
    pub fn new(
        matrix: Arc<DistanceMatrixBuilder>,
        percentage: usize,
        max_iter: usize,
        seed: u64,
    ) -> ClusterResult<Self> {
        if percentage == 0 {
            return Err(ClusterError::ZeroPercentage);
        }
        Ok(Self {
            matrix,
            percentage,
            max_iter,
            seed,
        })
    }
}

/// Number of partitional clusters for `n` instances.
pub fn cluster_count(n: usize, percentage: usize) -> usize {
    n.div_ceil(percentage.max(1)) + 1
}

impl PrototypeSelector for PartitionalSelector {
    fn name(&self) -> &'static str {
        "partitional"
    }

    fn select(&self, group: &[FrameInstance]) -> ClusterResult<Prototypes> {
        if group.is_empty() {
            return Ok(Prototypes::new());
        }
        let distances = distances(&self.matrix, group)?;
        let k = cluster_count(group.len(), self.percentage);
        let result = k_medoids(&distances, k, self.max_iter, self.seed);

        debug!(
            instances = group.len(),
            k,
            medoids = result.medoids.len(),
            iterations = result.iterations,
            "partitional selection"
        );
        Ok(result.medoids.iter().map(|&m| record(&group[m])).collect())
    }
}

fn distances(
    builder: &DistanceMatrixBuilder,
    group: &[FrameInstance],
) -> ClusterResult<SquareMatrix> {
    let matrix = builder.build(group)?;
    if matrix.len() != group.len() {
        return Err(ClusterError::MatrixSize {
            expected: group.len(),
            actual: matrix.len(),
        });
    }
    Ok(matrix.square())
}

/// Build the configured strategy.
///
/// Matrix-based strategies require `matrix`; the frequency strategy
/// ignores it.
pub fn build_selector(
    config: &SelectionConfig,
    matrix: Option<Arc<DistanceMatrixBuilder>>,
) -> ClusterResult<Box<dyn PrototypeSelector>> {
    let need = |kind: StrategyKind| matrix.clone().ok_or(ClusterError::MatrixUnavailable(kind.as_str()));

    Ok(match config.strategy {
        StrategyKind::Frequency => Box::new(FrequencySelector::new(config.top)?),
        StrategyKind::Hierarchical => Box::new(HierarchicalSelector::new(
            need(StrategyKind::Hierarchical)?,
            config.cut_threshold,
            config.min_cluster_size,
        )),
        StrategyKind::Partitional => Box::new(PartitionalSelector::new(
            need(StrategyKind::Partitional)?,
            config.percentage,
            config.kmedoids_max_iter,
            config.kmedoids_seed,
        )?),
    })
}
