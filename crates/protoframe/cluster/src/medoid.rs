//! Medoid search with early abort.

use protoframe_similarity::SquareMatrix;

/// The member of `members` with minimum total distance to the others.
///
/// A candidate's running sum is abandoned as soon as it exceeds the best
/// total so far; with non-negative distances that candidate could not have
/// won, so the result equals a full brute-force comparison. Ties go to the
/// candidate listed first. `None` for an empty cluster.
pub fn find_medoid(members: &[usize], distances: &SquareMatrix) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for &candidate in members {
        let bound = best.map(|(_, total)| total);
        let mut total = 0.0;
        let mut pruned = false;

        for &other in members {
            if other == candidate {
                continue;
            }
            total += distances.get(candidate, other);
            if bound.map_or(false, |b| total > b) {
                pruned = true;
                break;
            }
        }

        match bound {
            None => best = Some((candidate, total)),
            Some(b) if !pruned && total < b => best = Some((candidate, total)),
            _ => {}
        }
    }

    best.map(|(medoid, _)| medoid)
}
