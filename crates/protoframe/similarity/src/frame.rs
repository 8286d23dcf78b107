//! Frame-type relatedness metrics.

use protoframe_lexicon::{cosine_similarity, Lexicon};

use crate::error::{SimilarityError, SimilarityResult};

/// Co-occurrence relatedness of two frame types.
///
/// The contexts of a frame are the corpus sentences in which any of its
/// lexical units occur. Probabilities are context counts over the number
/// of corpus sentences; the score is PMI normalized into [0,1].
pub fn occurrence_relatedness(lexicon: &Lexicon, a: &str, b: &str) -> SimilarityResult<f64> {
    let contexts_a = lexicon
        .frame_contexts(a)
        .ok_or_else(|| SimilarityError::MissingFrame(a.to_string()))?;
    let contexts_b = lexicon
        .frame_contexts(b)
        .ok_or_else(|| SimilarityError::MissingFrame(b.to_string()))?;

    let total = lexicon.sentence_count() as f64;
    if total == 0.0 {
        return Ok(0.0);
    }
    let shared = contexts_a.intersection(&contexts_b).count() as f64;

    Ok(normalized_pmi(
        contexts_a.len() as f64 / total,
        contexts_b.len() as f64 / total,
        shared / total,
    ))
}

/// `((log2(p_ab / (p_a p_b)) / -log2(p_ab)) + 1) / 2`.
///
/// Zero joint or marginal probability gives 0.0. A joint probability of 1
/// (every context shared) gives 1.0.
pub fn normalized_pmi(p_a: f64, p_b: f64, p_ab: f64) -> f64 {
    if p_ab <= 0.0 || p_a <= 0.0 || p_b <= 0.0 {
        return 0.0;
    }
    if p_ab >= 1.0 {
        return 1.0;
    }
    let npmi = (p_ab / (p_a * p_b)).log2() / -p_ab.log2();
    ((npmi + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Embedding relatedness of two frame types, clamped into [0,1].
pub fn vector_relatedness(lexicon: &Lexicon, a: &str, b: &str) -> SimilarityResult<f64> {
    let table = lexicon
        .frame_vectors()
        .ok_or_else(|| SimilarityError::MissingVector(a.to_string()))?;
    let va = table
        .get(a)
        .ok_or_else(|| SimilarityError::MissingVector(a.to_string()))?;
    let vb = table
        .get(b)
        .ok_or_else(|| SimilarityError::MissingVector(b.to_string()))?;
    Ok(cosine_similarity(va, vb).clamp(0.0, 1.0))
}
