//! `protoframe select`: filter, group, and reduce instances to prototypes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use protoframe_cluster::{build_selector, StrategyKind};
use protoframe_curation::{
    build_validator, filter_instances, select_relations, ConceptCatalog, DatasetStatistics,
    PrototypeSearch, SeedObjects, ValidatorKind,
};
use protoframe_similarity::DistanceMatrixBuilder;
use protoframe_types::Prototypes;
use tracing::info;

use super::{build_engine, load_lexicon};
use crate::config::AppConfig;
use crate::io;

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// JSON array of frame instances
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory receiving the result files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Selection strategy (frequency, hierarchical, partitional)
    #[arg(short, long)]
    pub strategy: Option<StrategyKind>,

    /// Frame-validity gate (core, synset, embeddings, none)
    #[arg(long)]
    pub validator: Option<ValidatorKind>,

    /// Worker threads for distance matrix construction
    #[arg(short, long)]
    pub workers: Option<usize>,
}

impl SelectArgs {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(strategy) = self.strategy {
            config.selection.strategy = strategy;
        }
        if let Some(kind) = self.validator {
            config.validator.kind = kind;
        }
        if let Some(workers) = self.workers {
            config.matrix.workers = workers;
        }
    }
}

/// Counts reported after a run.
#[derive(Debug, Default)]
pub struct SelectSummary {
    pub instances: usize,
    pub accepted: usize,
    pub frame_types: usize,
    pub prototypes: usize,
    pub statistics: Option<DatasetStatistics>,
}

pub fn run(config: &AppConfig, args: &SelectArgs) -> anyhow::Result<SelectSummary> {
    let instances = io::read_instances(&args.input)?;
    let mut summary = SelectSummary {
        instances: instances.len(),
        ..Default::default()
    };

    let strategy = config.selection.strategy;
    let lexicon = if strategy.needs_matrix() || config.validator.kind.needs_lexicon() {
        Some(load_lexicon(config)?)
    } else {
        None
    };

    let validator = build_validator(&config.validator, lexicon.clone())?;
    let groups = filter_instances(instances, validator.as_ref());
    summary.accepted = groups.total_instances();
    summary.frame_types = groups.len();

    let matrix = match lexicon {
        Some(lexicon) if strategy.needs_matrix() => {
            let engine = Arc::new(build_engine(config, lexicon)?);
            Some(Arc::new(DistanceMatrixBuilder::new(engine, &config.matrix)?))
        }
        _ => None,
    };

    let selector = build_selector(&config.selection, matrix)?;
    let search = PrototypeSearch::new(selector, config.selection.min_group_size);
    let prototypes = search.run(&groups)?;
    summary.prototypes = prototypes.len();

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    io::write_json(&args.output.join("prototypes.json"), &prototypes)?;

    if let Some(path) = &config.output.concept_catalog {
        let catalog = ConceptCatalog::load(path)?;
        let seeds = config
            .output
            .seed_objects
            .as_deref()
            .map(SeedObjects::load)
            .transpose()?;
        summary.statistics = Some(render(&args.output, &prototypes, &catalog, seeds.as_ref())?);
    }

    info!(
        strategy = %strategy,
        instances = summary.instances,
        accepted = summary.accepted,
        frame_types = summary.frame_types,
        prototypes = summary.prototypes,
        output = %args.output.display(),
        "prototype selection finished"
    );
    Ok(summary)
}

/// Write verbalizations, triples, and statistics for the relations kept
/// by the seed filter.
fn render(
    dir: &Path,
    prototypes: &Prototypes,
    catalog: &ConceptCatalog,
    seeds: Option<&SeedObjects>,
) -> anyhow::Result<DatasetStatistics> {
    let selection = select_relations(prototypes, catalog, seeds);
    let stats = DatasetStatistics::from_triples(&selection.uris);

    io::write_lines(&dir.join("verbalized.txt"), &selection.sentences)?;
    io::write_lines(
        &dir.join("triples.nt"),
        selection.uris.iter().map(|t| format!("{} .", t)),
    )?;
    io::write_lines(
        &dir.join("triples_label.nt"),
        selection.labels.iter().map(|t| format!("{} .", t)),
    )?;
    fs::write(dir.join("statistics.txt"), format!("{}\n", stats))?;

    info!(
        sentences = selection.sentences.len(),
        relations = stats.relations,
        fillers = stats.fillers,
        "rendered prototypes"
    );
    Ok(stats)
}
