//! The similarity engine.
//!
//! Combines frame-type relatedness with a symmetric best-match aggregate
//! over frame-element fillers:
//!
//! ```text
//! sim(A, B) = alpha * frame(A.type, B.type) + (1 - alpha) * elements(A, B)
//! elements  = (mean_a max_b s(a, b) + mean_b max_a s(a, b)) / 2
//! ```
//!
//! Every public scoring operation has a recovering form, which logs
//! failures and substitutes a neutral score, and a `try_` form, which
//! returns the first failure instead.

use std::sync::Arc;

use protoframe_lexicon::Lexicon;
use protoframe_types::{concept_key, FrameElement, FrameInstance};
use tracing::warn;

use crate::cache::{CacheKind, SimilarityCache};
use crate::config::{ElementMethod, FrameMethod, SimilarityConfig};
use crate::error::{SimilarityError, SimilarityResult};
use crate::frame::{occurrence_relatedness, vector_relatedness};
use crate::remote::{service_key, ConceptSimilarity};
use crate::taxonomy::wu_palmer;

/// Scores frame types, fillers, and whole frame instances.
///
/// Holds the read-only lexicon, an append-only score cache, and an optional
/// remote provider. Safe to share across worker threads.
pub struct SimilarityEngine {
    lexicon: Arc<Lexicon>,
    cache: Arc<SimilarityCache>,
    remote: Option<Arc<dyn ConceptSimilarity>>,
    config: SimilarityConfig,
}

impl SimilarityEngine {
    pub fn new(lexicon: Arc<Lexicon>, config: SimilarityConfig) -> Self {
        Self {
            lexicon,
            cache: Arc::new(SimilarityCache::new()),
            remote: None,
            config,
        }
    }

    /// Use an externally owned cache, e.g. one shared between engines.
    pub fn with_cache(mut self, cache: Arc<SimilarityCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Attach a remote concept-similarity provider.
    pub fn with_remote(mut self, remote: Arc<dyn ConceptSimilarity>) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    pub fn cache(&self) -> &SimilarityCache {
        &self.cache
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    // ── Frame types ─────────────────────────────────────────────────────

    /// Relatedness of two frame types in [0,1]. Never fails.
    ///
    /// A missing embedding yields the configured `missing_vector_default`;
    /// any other failure yields 0.0.
    pub fn frame_relatedness(&self, a: &str, b: &str, method: FrameMethod) -> f64 {
        match self.try_frame_relatedness(a, b, method) {
            Ok(score) => score,
            Err(SimilarityError::MissingVector(frame)) => {
                warn!(frame_a = a, frame_b = b, missing = %frame, "frame vector missing, using default");
                self.config.missing_vector_default
            }
            Err(e) => {
                warn!(frame_a = a, frame_b = b, error = %e, "frame relatedness defaulted to 0");
                0.0
            }
        }
    }

    pub fn try_frame_relatedness(
        &self,
        a: &str,
        b: &str,
        method: FrameMethod,
    ) -> SimilarityResult<f64> {
        let kind = match method {
            FrameMethod::Occurrence => CacheKind::FrameOccurrence,
            FrameMethod::Vector => CacheKind::FrameVector,
        };
        if let Some(score) = self.cache.get(kind, a, b) {
            return Ok(score);
        }

        let score = match method {
            FrameMethod::Occurrence => occurrence_relatedness(&self.lexicon, a, b)?,
            FrameMethod::Vector => vector_relatedness(&self.lexicon, a, b)?,
        };
        let score = finite(score, a, b)?;
        self.cache.insert(kind, a, b, score);
        Ok(score)
    }

    // ── Frame-element fillers ───────────────────────────────────────────

    /// Relatedness of two filler entities in [0,1]. Never fails; failures
    /// (unknown senses, remote errors) score 0.0.
    pub fn element_relatedness(&self, e1: &str, e2: &str, method: ElementMethod) -> f64 {
        self.try_element_relatedness(e1, e2, method)
            .unwrap_or_else(|e| {
                warn!(entity_a = e1, entity_b = e2, error = %e, "element relatedness defaulted to 0");
                0.0
            })
    }

    pub fn try_element_relatedness(
        &self,
        e1: &str,
        e2: &str,
        method: ElementMethod,
    ) -> SimilarityResult<f64> {
        let kind = match method {
            ElementMethod::Taxonomic => CacheKind::ElementTaxonomic,
            ElementMethod::Remote => CacheKind::ElementRemote,
        };
        if let Some(score) = self.cache.get(kind, e1, e2) {
            return Ok(score);
        }

        let score = match method {
            ElementMethod::Taxonomic => {
                let n1 = self.sense_name_of(e1)?;
                let n2 = self.sense_name_of(e2)?;
                wu_palmer(self.lexicon.taxonomy(), n1, n2)
            }
            ElementMethod::Remote => {
                let remote = self
                    .remote
                    .as_ref()
                    .ok_or(SimilarityError::RemoteUnavailable)?;
                let k1 = service_key(e1)?;
                let k2 = service_key(e2)?;
                if k1 == k2 {
                    1.0
                } else {
                    remote.similarity(&k1, &k2)?
                }
            }
        };
        let score = finite(score, e1, e2)?;
        self.cache.insert(kind, e1, e2, score);
        Ok(score)
    }

    /// entity token → concept id → older sense id → canonical sense name.
    fn sense_name_of<'a>(&'a self, entity: &'a str) -> SimilarityResult<&'a str> {
        let id = concept_key(entity);
        let old = self
            .lexicon
            .map_sense_version(id)
            .ok_or_else(|| SimilarityError::MissingSense(id.to_string()))?;
        self.lexicon
            .sense_name(old)
            .ok_or_else(|| SimilarityError::MissingConcept(old.to_string()))
    }

    /// Symmetric best-match relatedness of two element sets.
    ///
    /// With `match_roles`, fillers of different roles score 0. An empty
    /// side contributes a directional average of 0.
    pub fn element_set_relatedness(
        &self,
        a: &[FrameElement],
        b: &[FrameElement],
        match_roles: bool,
        method: ElementMethod,
    ) -> f64 {
        best_match_average(a, b, match_roles, |x, y| {
            Ok(self.element_relatedness(x, y, method))
        })
        .unwrap_or(0.0)
    }

    pub fn try_element_set_relatedness(
        &self,
        a: &[FrameElement],
        b: &[FrameElement],
        match_roles: bool,
        method: ElementMethod,
    ) -> SimilarityResult<f64> {
        best_match_average(a, b, match_roles, |x, y| {
            self.try_element_relatedness(x, y, method)
        })
    }

    // ── Frame instances ─────────────────────────────────────────────────

    /// Similarity of two frame instances in [0,1]. Never fails.
    ///
    /// Structurally identical instances score 1.0 without consulting any
    /// metric. A zero `alpha` skips frame-type relatedness entirely; an
    /// `alpha` of one skips the elements.
    pub fn instance_similarity(
        &self,
        a: &FrameInstance,
        b: &FrameInstance,
        alpha: f64,
        match_roles: bool,
    ) -> f64 {
        if a.same_structure(b) {
            return 1.0;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let frame = if alpha > 0.0 {
            self.frame_relatedness(&a.frame_type, &b.frame_type, self.config.frame_method)
        } else {
            0.0
        };
        let elements = if alpha < 1.0 {
            self.element_set_relatedness(
                &a.elements,
                &b.elements,
                match_roles,
                self.config.element_method,
            )
        } else {
            0.0
        };
        combine(alpha, frame, elements)
    }

    pub fn try_instance_similarity(
        &self,
        a: &FrameInstance,
        b: &FrameInstance,
        alpha: f64,
        match_roles: bool,
    ) -> SimilarityResult<f64> {
        if a.same_structure(b) {
            return Ok(1.0);
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let frame = if alpha > 0.0 {
            self.try_frame_relatedness(&a.frame_type, &b.frame_type, self.config.frame_method)?
        } else {
            0.0
        };
        let elements = if alpha < 1.0 {
            self.try_element_set_relatedness(
                &a.elements,
                &b.elements,
                match_roles,
                self.config.element_method,
            )?
        } else {
            0.0
        };
        Ok(combine(alpha, frame, elements))
    }

    /// [`instance_similarity`](Self::instance_similarity) with the
    /// configured `alpha` and `match_roles`.
    pub fn similarity(&self, a: &FrameInstance, b: &FrameInstance) -> f64 {
        self.instance_similarity(a, b, self.config.alpha, self.config.match_roles)
    }
}

fn combine(alpha: f64, frame: f64, elements: f64) -> f64 {
    (alpha * frame + (1.0 - alpha) * elements).clamp(0.0, 1.0)
}

fn finite(score: f64, a: &str, b: &str) -> SimilarityResult<f64> {
    if score.is_finite() {
        Ok(score.clamp(0.0, 1.0))
    } else {
        Err(SimilarityError::NonFinite(format!("{} / {}", a, b)))
    }
}

fn best_match_average<F>(
    a: &[FrameElement],
    b: &[FrameElement],
    match_roles: bool,
    mut score: F,
) -> SimilarityResult<f64>
where
    F: FnMut(&str, &str) -> SimilarityResult<f64>,
{
    let mut row_best = vec![0.0_f64; a.len()];
    let mut col_best = vec![0.0_f64; b.len()];

    for (i, ea) in a.iter().enumerate() {
        for (j, eb) in b.iter().enumerate() {
            if match_roles && ea.role != eb.role {
                continue;
            }
            let s = score(&ea.entity, &eb.entity)?;
            row_best[i] = row_best[i].max(s);
            col_best[j] = col_best[j].max(s);
        }
    }

    Ok((mean(&row_best) + mean(&col_best)) / 2.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
