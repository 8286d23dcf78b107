//! Protoframe CLI - prototype selection over annotated frame instances
//!
//! The CLI wires the library crates into one batch run:
//! - Load layered configuration (defaults, file, environment, flags)
//! - Load the static lexical tables the chosen strategy and validator need
//! - Filter instances through the validity gate and group them by frame type
//! - Select prototypes per group and write them with their renderings

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use protoframe_lexicon::LexiconPaths;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod io;

use commands::{select, similarity};
use config::AppConfig;

/// Protoframe CLI
#[derive(Parser)]
#[command(name = "protoframe")]
#[command(about = "Select prototypical frame instances from annotated frame data", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PROTOFRAME_CONFIG")]
    config: Option<String>,

    /// Root directory of the static lexical tables, replacing every
    /// configured table path with its default location under it
    #[arg(short, long, global = true, env = "PROTOFRAME_RESOURCES")]
    resources: Option<PathBuf>,

    /// Log level, overriding the configured one
    #[arg(long, global = true, env = "PROTOFRAME_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true, env = "PROTOFRAME_LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Filter instances and select prototypes per frame type
    Select(select::SelectArgs),

    /// Print the similarity of two instances
    Similarity(similarity::SimilarityArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref().map(Path::new))?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.logging.json |= cli.json_logs;
    if let Some(root) = &cli.resources {
        let frame_vectors = config.lexicon.frame_vectors.take();
        config.lexicon = LexiconPaths::under(root);
        config.lexicon.frame_vectors = frame_vectors;
    }

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    match cli.command {
        Commands::Select(args) => {
            args.apply(&mut config);
            let summary = select::run(&config, &args)?;
            println!(
                "{} prototypes from {} of {} instances across {} frame types",
                summary.prototypes, summary.accepted, summary.instances, summary.frame_types
            );
            if let Some(statistics) = summary.statistics {
                println!("{}", statistics);
            }
        }
        Commands::Similarity(args) => {
            let score = similarity::run(&config, &args)?;
            println!("{:.6}", score);
        }
    }

    Ok(())
}
