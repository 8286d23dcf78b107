//! `protoframe similarity`: score two instances from an input file.

use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::Args;
use protoframe_types::FrameInstance;

use super::{build_engine, load_lexicon};
use crate::config::AppConfig;
use crate::io;

#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// JSON array of frame instances
    #[arg(short, long)]
    pub input: PathBuf,

    /// First instance id
    pub left: String,

    /// Second instance id
    pub right: String,

    /// Frame-type weight, overriding the configured one
    #[arg(short, long)]
    pub alpha: Option<f64>,

    /// Only compare fillers that share a role
    #[arg(long)]
    pub match_roles: bool,
}

pub fn run(config: &AppConfig, args: &SimilarityArgs) -> anyhow::Result<f64> {
    let instances = io::read_instances(&args.input)?;
    let left = find(&instances, &args.left)?;
    let right = find(&instances, &args.right)?;

    let alpha = args.alpha.unwrap_or(config.similarity.alpha);
    if !(0.0..=1.0).contains(&alpha) {
        bail!("alpha must lie in [0, 1], got {}", alpha);
    }
    let match_roles = args.match_roles || config.similarity.match_roles;

    let engine = build_engine(config, load_lexicon(config)?)?;
    Ok(engine.instance_similarity(left, right, alpha, match_roles))
}

fn find<'a>(instances: &'a [FrameInstance], id: &str) -> anyhow::Result<&'a FrameInstance> {
    instances
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| anyhow!("instance {} not found in input", id))
}
