//! Wu-Palmer similarity over the sense hierarchy.

use protoframe_lexicon::Taxonomy;

/// Wu-Palmer similarity of two sense names.
///
/// The least common subsumer is the deepest shared ancestor (ties go to the
/// lexicographically smallest name). With `d = depth(lcs) + 1`, the score is
/// `2d / (dist(a, lcs) + dist(b, lcs) + 2d)`. Senses without a shared
/// ancestor score 0.0.
pub fn wu_palmer(taxonomy: &Taxonomy, a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }

    let up_a = taxonomy.ancestors(a);
    let up_b = taxonomy.ancestors(b);

    let lcs = up_a
        .keys()
        .filter(|node| up_b.contains_key(*node))
        .max_by(|x, y| {
            taxonomy
                .depth(x)
                .cmp(&taxonomy.depth(y))
                .then_with(|| y.cmp(x))
        });

    match lcs {
        None => 0.0,
        Some(lcs) => {
            let depth = (taxonomy.depth(lcs) + 1) as f64;
            let dist_a = up_a[lcs] as f64;
            let dist_b = up_b[lcs] as f64;
            2.0 * depth / (dist_a + dist_b + 2.0 * depth)
        }
    }
}
