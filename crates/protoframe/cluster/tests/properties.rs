//! Property tests: medoid pruning never changes the answer, flat cuts
//! cover every instance once, k-medoids output is self-consistent.

use proptest::prelude::*;
use protoframe_cluster::*;
use protoframe_similarity::{condensed_len, DistanceMatrix, SquareMatrix};

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

/// Random symmetric distance matrix in [0,1] with a coarse value grid so
/// ties actually occur.
fn arb_matrix(max: usize) -> impl Strategy<Value = SquareMatrix> {
    (1..max).prop_flat_map(|n| {
        prop::collection::vec(0u8..=10, condensed_len(n)).prop_map(move |raw| {
            let ids = (0..n).map(|i| format!("f{}", i)).collect();
            let condensed = raw.into_iter().map(|v| v as f64 / 10.0).collect();
            DistanceMatrix::from_condensed(ids, condensed)
                .unwrap()
                .square()
        })
    })
}

/// Unpruned reference: full sums, strict `<`, first candidate wins ties.
fn brute_force_medoid(members: &[usize], d: &SquareMatrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &c in members {
        let mut total = 0.0;
        for &o in members {
            if o != c {
                total += d.get(c, o);
            }
        }
        if best.map_or(true, |(_, b)| total < b) {
            best = Some((c, total));
        }
    }
    best.map(|(m, _)| m)
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Early abort selects exactly the brute-force medoid, for every subset
    /// order.
    #[test]
    fn pruned_medoid_matches_brute_force(
        d in arb_matrix(12),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 1..12),
    ) {
        let mut members: Vec<usize> = picks.iter().map(|p| p.index(d.size())).collect();
        let mut seen = std::collections::HashSet::new();
        members.retain(|m| seen.insert(*m));
        prop_assert_eq!(find_medoid(&members, &d), brute_force_medoid(&members, &d));
    }

    /// Every instance lands in exactly one flat cluster, whatever the cut.
    #[test]
    fn flat_cut_covers_every_instance_once(
        d in arb_matrix(15),
        threshold in 0.0..=1.0f64,
    ) {
        let labels = average_linkage(&d).cut(threshold);
        prop_assert_eq!(labels.len(), d.size());

        let clusters = Cluster::from_labels(&labels);
        let mut all: Vec<usize> = clusters.iter().flat_map(|c| c.members.clone()).collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..d.size()).collect::<Vec<_>>());

        // labels are dense and numbered by first appearance
        let mut next = 0;
        for &l in &labels {
            prop_assert!(l <= next);
            if l == next {
                next += 1;
            }
        }
    }

    /// Merge distances never decrease under average linkage.
    #[test]
    fn average_linkage_is_monotone(d in arb_matrix(15)) {
        let dendrogram = average_linkage(&d);
        prop_assert_eq!(dendrogram.merges().len(), d.size() - 1);
        for pair in dendrogram.merges().windows(2) {
            prop_assert!(pair[0].distance <= pair[1].distance + 1e-12);
        }
    }

    /// Each point is assigned to its nearest medoid and medoids are
    /// distinct, sorted, and assigned to themselves or an equally near one.
    #[test]
    fn k_medoids_assignment_is_nearest(
        d in arb_matrix(15),
        k in 1usize..6,
        seed in any::<u64>(),
    ) {
        let result = k_medoids(&d, k, 100, seed);
        prop_assert_eq!(result.labels.len(), d.size());
        prop_assert!(result.medoids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(result.medoids.len() <= k.min(d.size()));
        for (p, &c) in result.labels.iter().enumerate() {
            let nearest = result
                .medoids
                .iter()
                .map(|&m| d.get(p, m))
                .fold(f64::INFINITY, f64::min);
            prop_assert_eq!(d.get(p, result.medoids[c]), nearest);
        }
    }
}

// ---------------------------------------------------------------------------
// Reference agglomeration
// ---------------------------------------------------------------------------

/// Continuous distances, so merge order has no ties.
fn arb_continuous_matrix(max: usize) -> impl Strategy<Value = SquareMatrix> {
    (2..max).prop_flat_map(|n| {
        prop::collection::vec(0.0..1.0f64, condensed_len(n)).prop_map(move |condensed| {
            let ids = (0..n).map(|i| format!("f{}", i)).collect();
            DistanceMatrix::from_condensed(ids, condensed)
                .unwrap()
                .square()
        })
    })
}

/// Quadratic-per-merge agglomeration with averages taken over member
/// pairs directly. Returns the merge heights and the flat labels at
/// `threshold`, numbered by first leaf.
fn naive_average_linkage(d: &SquareMatrix, threshold: f64) -> (Vec<f64>, Vec<usize>) {
    let n = d.size();
    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut heights = Vec::new();
    let mut labels = None;

    let flatten = |clusters: &[Vec<usize>]| {
        let mut owner = vec![0; n];
        for (c, members) in clusters.iter().enumerate() {
            for &m in members {
                owner[m] = c;
            }
        }
        let mut renumber = std::collections::HashMap::new();
        owner
            .iter()
            .map(|c| {
                let next = renumber.len();
                *renumber.entry(*c).or_insert(next)
            })
            .collect::<Vec<usize>>()
    };

    while clusters.len() > 1 {
        let mut best = (0, 1, f64::INFINITY);
        for i in 0..clusters.len() {
            for j in (i + 1)..clusters.len() {
                let mut total = 0.0;
                for &a in &clusters[i] {
                    for &b in &clusters[j] {
                        total += d.get(a, b);
                    }
                }
                let avg = total / (clusters[i].len() * clusters[j].len()) as f64;
                if avg < best.2 {
                    best = (i, j, avg);
                }
            }
        }
        if best.2 > threshold && labels.is_none() {
            labels = Some(flatten(&clusters));
        }
        heights.push(best.2);
        let absorbed = clusters.remove(best.1);
        clusters[best.0].extend(absorbed);
    }

    let labels = labels.unwrap_or_else(|| flatten(&clusters));
    (heights, labels)
}

proptest! {
    /// The chain-based agglomeration reproduces the pairwise-scan result.
    #[test]
    fn average_linkage_matches_reference(
        d in arb_continuous_matrix(14),
        threshold in 0.0..1.0f64,
    ) {
        let dendrogram = average_linkage(&d);
        let (heights, labels) = naive_average_linkage(&d, threshold);
        prop_assert_eq!(dendrogram.merges().len(), heights.len());
        for (merge, h) in dendrogram.merges().iter().zip(&heights) {
            prop_assert!((merge.distance - h).abs() < 1e-9);
        }
        prop_assert_eq!(dendrogram.cut(threshold), labels);
    }
}
