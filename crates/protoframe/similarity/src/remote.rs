//! Remote concept-similarity provider.
//!
//! The service is queried with two concept keys and answers with a JSON
//! object carrying a numeric `similarity` field.

use std::time::Duration;

use protoframe_types::concept_key;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::RemoteConfig;
use crate::error::{SimilarityError, SimilarityResult};

/// A pairwise concept-similarity source reachable by two keys.
pub trait ConceptSimilarity: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Similarity of two service keys in [0,1].
    fn similarity(&self, key1: &str, key2: &str) -> SimilarityResult<f64>;
}

/// Service key for an entity token: `<.../s00046516n>` → `bn:00046516n`.
pub fn service_key(entity: &str) -> SimilarityResult<String> {
    let id = concept_key(entity);
    let mut chars = id.chars();
    match chars.next() {
        Some(_) if !chars.as_str().is_empty() => Ok(format!("bn:{}", chars.as_str())),
        _ => Err(SimilarityError::Remote(format!(
            "entity {} has no usable concept id",
            entity
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct CosineResponse {
    similarity: Option<f64>,
}

/// HTTP client for a NASARI-style `/nasari/cosine` endpoint.
pub struct NasariClient {
    client: Client,
    base_url: String,
}

impl NasariClient {
    pub fn new(config: &RemoteConfig) -> SimilarityResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| SimilarityError::Remote(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.endpoint.trim_end_matches('/').to_string(),
        })
    }
}

impl ConceptSimilarity for NasariClient {
    fn name(&self) -> &str {
        "nasari"
    }

    fn similarity(&self, key1: &str, key2: &str) -> SimilarityResult<f64> {
        let url = format!("{}/nasari/cosine", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key1", key1), ("key2", key2)])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| SimilarityError::Remote(e.to_string()))?;

        let body: CosineResponse = response
            .json()
            .map_err(|e| SimilarityError::Remote(format!("malformed response: {}", e)))?;

        debug!(key1, key2, similarity = ?body.similarity, "remote similarity");
        match body.similarity {
            Some(s) if s.is_finite() => Ok(s.clamp(0.0, 1.0)),
            Some(s) => Err(SimilarityError::Remote(format!("non-finite similarity {}", s))),
            None => Err(SimilarityError::Remote(
                "response has no similarity field".into(),
            )),
        }
    }
}
