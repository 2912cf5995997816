/*
 * provgraph CLI
 *
 * Loads a provenance dataset, builds the session and prints the render
 * snapshot as JSON.
 *
 * Usage:
 *   provgraph --dataset nodes.json --analyses analyses.json
 *   provgraph --dataset nodes.json --analyses analyses.json \
 *             --facets facets.json --config vis.yaml --policy strict
 *   provgraph ... --events events.json --verbose
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use provgraph::features::graph_builder::{AnalysisRecord, DatasetRecord, FacetDocument};
use provgraph::features::motifs::LayeringPolicy;
use provgraph::{ProvSession, SessionEvent, VisConfig};

#[derive(Debug, Parser)]
#[command(name = "provgraph", version, about = "Provenance graph hierarchy and DOI engine")]
struct Args {
    /// Node records: `{"value": [...]}` or a bare array
    #[arg(long)]
    dataset: PathBuf,

    /// Analysis records
    #[arg(long)]
    analyses: PathBuf,

    /// Facet documents keyed by node uuid
    #[arg(long)]
    facets: Option<PathBuf>,

    /// YAML configuration (schema v1)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured layering policy
    #[arg(long, value_parser = parse_policy)]
    policy: Option<LayeringPolicy>,

    /// Events applied after loading, in order
    #[arg(long)]
    events: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_policy(s: &str) -> std::result::Result<LayeringPolicy, String> {
    LayeringPolicy::from_str(s)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => VisConfig::from_yaml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => VisConfig::default(),
    };
    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }

    let dataset: DatasetRecord = read_json(&args.dataset)?;
    let analyses: Vec<AnalysisRecord> = read_json(&args.analyses)?;
    let facets: Vec<FacetDocument> = match &args.facets {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let mut session = ProvSession::load(dataset.into_nodes(), analyses, facets, config)?;

    if let Some(path) = &args.events {
        let events: Vec<SessionEvent> = read_json(path)?;
        let count = events.len();
        for event in events {
            let name = event.name();
            session
                .handle(event)
                .with_context(|| format!("applying event '{}'", name))?;
        }
        info!(events = count, "Events applied");
    }

    let snapshot = serde_json::to_string_pretty(&session.snapshot())?;
    println!("{}", snapshot);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "provgraph failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
