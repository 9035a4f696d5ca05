//! Command-line entry point: loads `.env`, installs logging, parses
//! arguments, and runs the orchestrator against the no-op stub collaborators
//! (§10) — both the Span/Include Provider and the Graph Store Adapter stay
//! interface-only in this crate, so the binary wires up something that
//! type-checks rather than a production database client.

use clap::{Parser, ValueEnum};
use graph_ingest_core::ingest::{IngestStrategy, RecordingGraphStoreAdapter};
use graph_ingest_core::orchestrator::{self, OrchestratorConfig};
use graph_ingest_core::span::NoopSpanIncludeProvider;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "graph-ingest", about = "Materialise a C/C++ source index into a code knowledge graph")]
struct Cli {
    /// Path to the compiler-produced index file.
    index_path: PathBuf,
    /// Root of the project the index was built against.
    project_root: PathBuf,

    /// Parser worker count.
    #[arg(long)]
    workers: Option<usize>,

    /// Strategy for the high-volume defines-edge pass.
    #[arg(long, value_enum)]
    defines_strategy: Option<CliStrategy>,

    /// Server-side batch target (§4.6).
    #[arg(long)]
    cypher_tx_size: Option<usize>,

    /// Client-side batch target; currently informational only (no client
    /// submission loop to size, since the Graph Store Adapter is a stub).
    #[arg(long)]
    ingest_batch_size: Option<usize>,

    /// Skip Pass P5 and keep zero-degree nodes.
    #[arg(long)]
    keep_orphans: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliStrategy {
    UnwindCreate,
    ParallelMerge,
    ParallelCreate,
}

impl From<CliStrategy> for IngestStrategy {
    fn from(v: CliStrategy) -> Self {
        match v {
            CliStrategy::UnwindCreate => IngestStrategy::UnwindCreate,
            CliStrategy::ParallelMerge => IngestStrategy::ParallelMerge,
            CliStrategy::ParallelCreate => IngestStrategy::ParallelCreate,
        }
    }
}

fn main() -> ExitCode {
    // 1. Load .env, if present; a missing file is not an error.
    let _ = dotenvy::dotenv();

    // 2. Install the tracing formatter, driven by RUST_LOG (default "info").
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // 3. Parse CLI arguments.
    let cli = Cli::parse();

    // 4. Build the OrchestratorConfig: env defaults, then CLI overrides.
    let mut config = OrchestratorConfig::new(cli.index_path, cli.project_root).with_env_defaults();
    if let Some(workers) = cli.workers {
        config.parser.workers = workers;
    }
    if let Some(strategy) = cli.defines_strategy {
        config.planner.defines_strategy = strategy.into();
    }
    if let Some(tx_size) = cli.cypher_tx_size {
        config.planner.cypher_tx_size = tx_size;
    }
    config.keep_orphans = cli.keep_orphans;

    // 5. Run against the stub collaborators.
    let provider = NoopSpanIncludeProvider;
    let mut store = RecordingGraphStoreAdapter::default();

    // 6. Report the outcome.
    match orchestrator::run(&config, &provider, &mut store) {
        Ok(summary) => {
            println!(
                "parsed {} symbols, {} references linked, has_container_field={}",
                summary.symbols_parsed, summary.references_linked, summary.has_container_field
            );
            println!(
                "emitted {} nodes; {} contains, {} defines, {} includes, {} calls edges; {} orphans removed",
                summary.nodes_by_label.values().sum::<usize>(),
                summary.contains_edges,
                summary.defines_edges,
                summary.includes_edges,
                summary.calls_edges,
                summary.orphans_removed,
            );
            for (kind, count) in &summary.filtered_counts {
                if *count > 0 {
                    println!("  filtered: {kind} = {count}");
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}
