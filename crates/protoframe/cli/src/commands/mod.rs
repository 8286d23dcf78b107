//! Subcommand implementations

pub mod select;
pub mod similarity;

use std::sync::Arc;

use anyhow::Context;
use protoframe_lexicon::Lexicon;
use protoframe_similarity::{ElementMethod, NasariClient, SimilarityEngine};

use crate::config::AppConfig;

/// Load every static table named in the configuration.
fn load_lexicon(config: &AppConfig) -> anyhow::Result<Arc<Lexicon>> {
    let lexicon = Lexicon::load(&config.lexicon).context("failed to load lexical tables")?;
    Ok(Arc::new(lexicon))
}

/// Similarity engine wired with the remote provider when elements are
/// scored remotely.
fn build_engine(config: &AppConfig, lexicon: Arc<Lexicon>) -> anyhow::Result<SimilarityEngine> {
    let mut engine = SimilarityEngine::new(lexicon, config.similarity.clone());
    if config.similarity.element_method == ElementMethod::Remote {
        let client = NasariClient::new(&config.remote)?;
        engine = engine.with_remote(Arc::new(client));
    }
    Ok(engine)
}
