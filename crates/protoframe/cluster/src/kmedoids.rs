//! k-medoids by alternating assignment and medoid update.

use protoframe_similarity::SquareMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::medoid::find_medoid;

/// Result of a k-medoids run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMedoids {
    /// Medoid point indices, ascending.
    pub medoids: Vec<usize>,
    /// For every point, the position in `medoids` of its cluster.
    pub labels: Vec<usize>,
    /// Sum of distances from each point to its medoid.
    pub cost: f64,
    pub iterations: usize,
}

impl KMedoids {
    /// Point indices of cluster `c`, in ascending order.
    pub fn members(&self, c: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == c)
            .map(|(point, _)| point)
            .collect()
    }
}

/// Partition the points of `distances` around `k` medoids.
///
/// Initial medoids are a seeded uniform draw without replacement, so a
/// given seed always gives the same result. Each round assigns every point
/// to its nearest medoid (earliest medoid on ties), then replaces each
/// medoid with its cluster's medoid. A medoid left with no members moves
/// to the point farthest from its own medoid, so duplicates of one point
/// do not crowd out an outlier. Stops when the medoids no longer
/// change or after `max_iter` rounds. `k` is clamped to `1..=n`.
pub fn k_medoids(distances: &SquareMatrix, k: usize, max_iter: usize, seed: u64) -> KMedoids {
    let n = distances.size();
    if n == 0 {
        return KMedoids {
            medoids: Vec::new(),
            labels: Vec::new(),
            cost: 0.0,
            iterations: 0,
        };
    }
    let k = k.clamp(1, n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut medoids = rand::seq::index::sample(&mut rng, n, k).into_vec();
    medoids.sort_unstable();

    let mut labels = assign(distances, &medoids);
    let mut iterations = 0;

    while iterations < max_iter {
        iterations += 1;

        let mut updated: Vec<usize> = Vec::with_capacity(medoids.len());
        let mut empty = Vec::new();
        for (c, &current) in medoids.iter().enumerate() {
            let members: Vec<usize> = (0..n).filter(|&p| labels[p] == c).collect();
            match find_medoid(&members, distances) {
                Some(m) => updated.push(m),
                None => empty.push(current),
            }
        }
        for current in empty {
            let reseed = farthest_point(distances, &medoids, &labels, &updated);
            updated.push(reseed.unwrap_or(current));
        }
        updated.sort_unstable();
        updated.dedup();

        if updated == medoids {
            break;
        }
        medoids = updated;
        labels = assign(distances, &medoids);
    }

    let cost = labels
        .iter()
        .enumerate()
        .map(|(p, &c)| distances.get(p, medoids[c]))
        .sum();

    debug!(points = n, k = medoids.len(), iterations, cost, "k-medoids converged");

    KMedoids {
        medoids,
        labels,
        cost,
        iterations,
    }
}

/// Point worst served by its medoid, for an empty cluster to restart
/// from. Points already chosen as medoids and points sitting on their
/// medoid are never picked. Ties go to the lowest index.
fn farthest_point(
    distances: &SquareMatrix,
    medoids: &[usize],
    labels: &[usize],
    taken: &[usize],
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (p, &c) in labels.iter().enumerate() {
        if medoids.contains(&p) || taken.contains(&p) {
            continue;
        }
        let d = distances.get(p, medoids[c]);
        if d > 0.0 && best.map_or(true, |(_, b)| d > b) {
            best = Some((p, d));
        }
    }
    best.map(|(p, _)| p)
}

fn assign(distances: &SquareMatrix, medoids: &[usize]) -> Vec<usize> {
    (0..distances.size())
        .map(|p| {
            let mut best = 0;
            for (c, &m) in medoids.iter().enumerate().skip(1) {
                if distances.get(p, m) < distances.get(p, medoids[best]) {
                    best = c;
                }
            }
            best
        })
        .collect()
}
