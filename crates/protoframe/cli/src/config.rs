//! Configuration for the protoframe CLI

use std::path::{Path, PathBuf};

use protoframe_cluster::SelectionConfig;
use protoframe_curation::ValidatorConfig;
use protoframe_lexicon::LexiconPaths;
use protoframe_similarity::{MatrixConfig, RemoteConfig, SimilarityConfig};
use serde::{Deserialize, Serialize};

/// Full application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Static lexical tables
    #[serde(default)]
    pub lexicon: LexiconPaths,

    /// Instance similarity
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Distance matrix worker pool
    #[serde(default)]
    pub matrix: MatrixConfig,

    /// Remote concept-similarity service
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Prototype selection strategy
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Frame-validity gate
    #[serde(default)]
    pub validator: ValidatorConfig,

    /// Rendering of selected prototypes
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `concept_key<TAB>label<TAB>target_id` table. Verbalizations and
    /// triples are only written when set.
    #[serde(default)]
    pub concept_catalog: Option<PathBuf>,

    /// JSON seed objects. When set, only triples whose filler is a seed
    /// object are written, and only prototypes keeping a triple are
    /// verbalized.
    #[serde(default)]
    pub seed_objects: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// JSON format
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration: built-in defaults, then the optional file, then
    /// `PROTOFRAME_`-prefixed environment variables (`__` between levels,
    /// e.g. `PROTOFRAME_SELECTION__STRATEGY=hierarchical`).
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Add default configuration
        builder = builder.add_source(config::Config::try_from(&AppConfig::default())?);

        // An explicitly named file must exist
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("PROTOFRAME")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
