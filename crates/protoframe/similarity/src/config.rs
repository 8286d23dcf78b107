//! Similarity, matrix, and remote-provider configuration.

use serde::{Deserialize, Serialize};

/// How two frame types are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMethod {
    /// Normalized PMI of corpus co-occurrence of the frames' lexical units.
    Occurrence,
    /// Cosine similarity of frame-type embedding vectors.
    Vector,
}

/// How two frame-element fillers are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementMethod {
    /// Wu-Palmer similarity over the sense hierarchy.
    Taxonomic,
    /// External concept-similarity service.
    Remote,
}

/// Parameters of instance-level similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Weight of frame-type relatedness; `1 - alpha` weighs the elements.
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Only compare fillers that share a role.
    #[serde(default)]
    pub match_roles: bool,

    #[serde(default = "default_frame_method")]
    pub frame_method: FrameMethod,

    #[serde(default = "default_element_method")]
    pub element_method: ElementMethod,

    /// Score used when a frame type has no embedding vector.
    #[serde(default)]
    pub missing_vector_default: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            match_roles: false,
            frame_method: default_frame_method(),
            element_method: default_element_method(),
            missing_vector_default: 0.0,
        }
    }
}

/// Distance matrix construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixConfig {
    /// Worker threads scoring pairs concurrently. Also bounds the fan-out
    /// to a remote similarity provider.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// Remote concept-similarity service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_alpha() -> f64 {
    0.4
}

fn default_frame_method() -> FrameMethod {
    FrameMethod::Occurrence
}

fn default_element_method() -> ElementMethod {
    ElementMethod::Taxonomic
}

fn default_workers() -> usize {
    4
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SimilarityConfig::default();
        assert_eq!(c.alpha, 0.4);
        assert!(!c.match_roles);
        assert_eq!(c.frame_method, FrameMethod::Occurrence);
        assert_eq!(c.element_method, ElementMethod::Taxonomic);
        assert_eq!(MatrixConfig::default().workers, 4);
        assert_eq!(RemoteConfig::default().timeout_ms, 5000);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let c: SimilarityConfig =
            serde_json::from_str(r#"{"alpha": 0.0, "element_method": "remote"}"#).unwrap();
        assert_eq!(c.alpha, 0.0);
        assert_eq!(c.element_method, ElementMethod::Remote);
        assert_eq!(c.frame_method, FrameMethod::Occurrence);
    }
}
