//! Average-linkage agglomerative clustering.

use protoframe_similarity::{condensed_index, condensed_len, SquareMatrix};

/// One agglomeration step.
///
/// Leaves are numbered `0..n`; the cluster formed by merge `k` is `n + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    /// Average pairwise distance between the two merged clusters.
    pub distance: f64,
    /// Leaves in the merged cluster.
    pub size: usize,
}

/// Full merge history over `n` leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    pub fn leaves(&self) -> usize {
        self.leaves
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    /// Flat cluster labels after applying every merge at distance
    /// `<= threshold`.
    ///
    /// Every leaf gets exactly one label. Labels are numbered from 0 in
    /// order of each cluster's first leaf.
    pub fn cut(&self, threshold: f64) -> Vec<usize> {
        let n = self.leaves;
        let mut parent: Vec<usize> = (0..n).collect();
        // representative leaf of every cluster id, leaves and merges alike
        let mut rep: Vec<usize> = (0..n).collect();
        rep.reserve(self.merges.len());

        for merge in &self.merges {
            let (a, b) = (rep[merge.left], rep[merge.right]);
            if merge.distance <= threshold {
                let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
                if ra != rb {
                    parent[ra.max(rb)] = ra.min(rb);
                }
            }
            rep.push(a.min(b));
        }

        let mut labels = vec![usize::MAX; n];
        let mut next = 0;
        let mut root_label = vec![usize::MAX; n];
        for leaf in 0..n {
            let root = find(&mut parent, leaf);
            if root_label[root] == usize::MAX {
                root_label[root] = next;
                next += 1;
            }
            labels[leaf] = root_label[root];
        }
        labels
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// Agglomerate all leaves of `distances` with average (UPGMA) linkage.
///
/// Uses the nearest-neighbour chain: follow nearest neighbours until two
/// clusters are each other's nearest, merge them, continue from the rest
/// of the chain. Average linkage is reducible, so the chain stays valid
/// after a merge and the whole run is O(n²). Cluster distances are kept in
/// one condensed working copy and updated with Lance-Williams:
/// `d(i∪j, k) = (|i| d(i,k) + |j| d(j,k)) / (|i| + |j|)`.
///
/// Merges are reported in ascending distance order; merges at equal
/// distance keep the order in which they were found.
pub fn average_linkage(distances: &SquareMatrix) -> Dendrogram {
    let n = distances.size();
    let mut dist = vec![0.0; condensed_len(n)];
    for i in 0..n {
        for j in (i + 1)..n {
            dist[condensed_index(n, i, j)] = distances.get(i, j);
        }
    }
    let mut active = vec![true; n];
    let mut sizes = vec![1usize; n];
    let mut chain: Vec<usize> = Vec::with_capacity(n);
    // (slot, slot, distance) in discovery order
    let mut found: Vec<(usize, usize, f64)> = Vec::with_capacity(n.saturating_sub(1));

    for _ in 1..n {
        if chain.is_empty() {
            if let Some(first) = active.iter().position(|&a| a) {
                chain.push(first);
            }
        }
        let Some((a, b, height)) = reciprocal_pair(&dist, &active, &mut chain) else {
            break;
        };
        chain.truncate(chain.len() - 2);

        let (keep, gone) = (a.min(b), a.max(b));
        let (sk, sg) = (sizes[keep] as f64, sizes[gone] as f64);
        for k in (0..n).filter(|&k| active[k] && k != keep && k != gone) {
            let merged = (sk * pair(&dist, n, keep, k) + sg * pair(&dist, n, gone, k)) / (sk + sg);
            dist[condensed_index(n, keep.min(k), keep.max(k))] = merged;
        }
        sizes[keep] += sizes[gone];
        active[gone] = false;
        found.push((keep, gone, height));
    }

    found.sort_by(|x, y| x.2.total_cmp(&y.2));

    // Relabel slots to cluster ids in sorted order.
    let mut parent: Vec<usize> = (0..n).collect();
    let mut cluster_id: Vec<usize> = (0..n).collect();
    let mut cluster_size = vec![1usize; n];
    let mut merges = Vec::with_capacity(found.len());
    for (k, &(a, b, distance)) in found.iter().enumerate() {
        let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
        let (ia, ib) = (cluster_id[ra], cluster_id[rb]);
        let size = cluster_size[ra] + cluster_size[rb];
        let (root, child) = (ra.min(rb), ra.max(rb));
        parent[child] = root;
        cluster_id[root] = n + k;
        cluster_size[root] = size;
        merges.push(Merge {
            left: ia.min(ib),
            right: ia.max(ib),
            distance,
            size,
        });
    }

    Dendrogram { leaves: n, merges }
}

fn pair(dist: &[f64], n: usize, a: usize, b: usize) -> f64 {
    dist[condensed_index(n, a.min(b), a.max(b))]
}

/// Extend the chain by nearest neighbours until its last two clusters
/// are each other's nearest. Ties prefer the previous chain element, then
/// the lowest slot.
fn reciprocal_pair(
    dist: &[f64],
    active: &[bool],
    chain: &mut Vec<usize>,
) -> Option<(usize, usize, f64)> {
    let n = active.len();
    loop {
        let a = *chain.last()?;
        let prev = chain.len().checked_sub(2).map(|p| chain[p]);
        let mut best = prev.map_or(f64::INFINITY, |p| pair(dist, n, a, p));
        let mut next = prev;
        for x in (0..n).filter(|&x| active[x] && x != a) {
            let dx = pair(dist, n, a, x);
            if dx < best {
                best = dx;
                next = Some(x);
            }
        }
        match next? {
            b if Some(b) == prev => return Some((a, b, best)),
            b => chain.push(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoframe_similarity::DistanceMatrix;

    fn matrix(n: usize, condensed: Vec<f64>) -> SquareMatrix {
        let ids = (0..n).map(|i| i.to_string()).collect();
        DistanceMatrix::from_condensed(ids, condensed).unwrap().square()
    }

    /// Two tight pairs far apart: {0,1} and {2,3}.
    fn two_pairs() -> SquareMatrix {
        // (0,1) (0,2) (0,3) (1,2) (1,3) (2,3)
        matrix(4, vec![0.1, 0.9, 0.8, 0.7, 0.9, 0.2])
    }

    #[test]
    fn merge_history() {
        let d = average_linkage(&two_pairs());
        assert_eq!(d.leaves(), 4);
        let merges = d.merges();
        assert_eq!(merges.len(), 3);
        assert_eq!((merges[0].left, merges[0].right), (0, 1));
        assert_eq!(merges[0].distance, 0.1);
        assert_eq!((merges[1].left, merges[1].right), (2, 3));
        assert_eq!(merges[1].distance, 0.2);
        assert_eq!((merges[2].left, merges[2].right), (4, 5));
        assert_eq!(merges[2].size, 4);
        // average of the four cross distances
        assert!((merges[2].distance - (0.9 + 0.8 + 0.7 + 0.9) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn cut_levels() {
        let d = average_linkage(&two_pairs());
        assert_eq!(d.cut(0.05), vec![0, 1, 2, 3]);
        assert_eq!(d.cut(0.1), vec![0, 0, 1, 2]);
        assert_eq!(d.cut(0.3), vec![0, 0, 1, 1]);
        assert_eq!(d.cut(1.0), vec![0, 0, 0, 0]);
    }

    #[test]
    fn labels_follow_first_leaf() {
        // {0,2} close, 1 far from both
        let d = average_linkage(&matrix(3, vec![0.9, 0.1, 0.9]));
        assert_eq!(d.cut(0.3), vec![0, 1, 0]);
    }

    #[test]
    fn empty_and_single() {
        assert!(average_linkage(&matrix(0, vec![])).cut(0.3).is_empty());
        let single = average_linkage(&matrix(1, vec![]));
        assert!(single.merges().is_empty());
        assert_eq!(single.cut(0.3), vec![0]);
    }
}
