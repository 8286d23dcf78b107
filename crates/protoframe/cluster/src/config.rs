//! Prototype-selection configuration.

use serde::{Deserialize, Serialize};

/// Which selection strategy reduces each frame-type group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Most frequent canonical signatures. The default pipeline binding.
    Frequency,
    /// Average-linkage agglomeration, flat cut, one medoid per cluster.
    Hierarchical,
    /// k-medoids over the full distance matrix.
    Partitional,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Frequency => "frequency",
            StrategyKind::Hierarchical => "hierarchical",
            StrategyKind::Partitional => "partitional",
        }
    }

    /// Whether the strategy clusters over a pairwise distance matrix.
    pub fn needs_matrix(&self) -> bool {
        !matches!(self, StrategyKind::Frequency)
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frequency" => Ok(StrategyKind::Frequency),
            "hierarchical" => Ok(StrategyKind::Hierarchical),
            "partitional" => Ok(StrategyKind::Partitional),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,

    /// Frame-type groups smaller than this are not searched.
    #[serde(default = "default_min_group_size")]
    pub min_group_size: usize,

    /// Frequency: number of signature groups kept.
    #[serde(default = "default_top")]
    pub top: usize,

    /// Hierarchical: dendrogram cut distance.
    #[serde(default = "default_cut_threshold")]
    pub cut_threshold: f64,

    /// Hierarchical: clusters smaller than this yield no prototype.
    #[serde(default = "default_min_cluster_size")]
    pub min_cluster_size: usize,

    /// Partitional: `k = ceil(n / percentage) + 1`.
    #[serde(default = "default_percentage")]
    pub percentage: usize,

    #[serde(default = "default_kmedoids_max_iter")]
    pub kmedoids_max_iter: usize,

    /// Seed for the k-medoids initial medoid draw.
    #[serde(default)]
    pub kmedoids_seed: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            min_group_size: default_min_group_size(),
            top: default_top(),
            cut_threshold: default_cut_threshold(),
            min_cluster_size: default_min_cluster_size(),
            percentage: default_percentage(),
            kmedoids_max_iter: default_kmedoids_max_iter(),
            kmedoids_seed: 0,
        }
    }
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Frequency
}

fn default_min_group_size() -> usize {
    10
}

fn default_top() -> usize {
    10
}

fn default_cut_threshold() -> f64 {
    0.3
}

fn default_min_cluster_size() -> usize {
    3
}

fn default_percentage() -> usize {
    10
}

fn default_kmedoids_max_iter() -> usize {
    100
}
