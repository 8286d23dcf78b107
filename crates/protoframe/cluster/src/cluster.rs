//! Flat clusters over matrix indices.

use protoframe_similarity::SquareMatrix;

use crate::medoid::find_medoid;

/// A transient group of matrix indices and, once computed, its medoid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Member indices in ascending order.
    pub members: Vec<usize>,
    pub medoid: Option<usize>,
}

impl Cluster {
    /// Group indices by label. Clusters are returned in order of their
    /// first member.
    pub fn from_labels(labels: &[usize]) -> Vec<Cluster> {
        let mut slots: Vec<Option<usize>> = Vec::new();
        let mut clusters: Vec<Cluster> = Vec::new();

        for (point, &label) in labels.iter().enumerate() {
            if label >= slots.len() {
                slots.resize(label + 1, None);
            }
            let slot = *slots[label].get_or_insert_with(|| {
                clusters.push(Cluster {
                    members: Vec::new(),
                    medoid: None,
                });
                clusters.len() - 1
            });
            clusters[slot].members.push(point);
        }
        clusters
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Compute and store the medoid.
    pub fn resolve_medoid(&mut self, distances: &SquareMatrix) -> Option<usize> {
        self.medoid = find_medoid(&self.members, distances);
        self.medoid
    }
}
