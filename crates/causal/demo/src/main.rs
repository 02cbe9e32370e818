//! Causal Loop demo: bootstrap an engine and feed it a sequence of queries.
//!
//! ```text
//! causal-demo "what is the baseline?" "ping" --dump
//! RUST_LOG=debug causal-demo --config loop.json ping
//! ```

use causal_engine::{CommitmentPayload, EngineConfig, EvolutionEngine, SelectorKind};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "causal-demo")]
#[command(about = "Run evolve cycles against a fresh causal loop", long_about = None)]
#[command(version)]
struct Cli {
    /// Queries to evolve, in order
    #[arg(default_values_t = [String::from("ping")])]
    queries: Vec<String>,

    /// JSON engine config file
    #[arg(short, long, env = "CAUSAL_CONFIG")]
    config: Option<PathBuf>,

    /// Use keyword relevance instead of the full snapshot
    #[arg(short, long)]
    keyword: bool,

    /// Print the final store snapshot as JSON
    #[arg(long)]
    dump: bool,

    /// Enable debug-level cycle events
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("[FATAL] {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => EngineConfig::default(),
    };
    if cli.keyword {
        config = config.with_selector(SelectorKind::Keyword);
    }

    let engine = EvolutionEngine::from_config(config)?;
    println!(
        "bootstrapped with {} ({} record)",
        engine.config().bootstrap_id,
        engine.store().len()
    );

    for query in &cli.queries {
        let confirmation = engine.evolve(query)?;
        println!("{}", confirmation);
        if let Some(commitment) = engine
            .store()
            .get(&confirmation.commitment_id)
            .as_ref()
            .and_then(CommitmentPayload::from_record)
        {
            println!("    {}", commitment.response);
        }
    }

    println!(
        "{} cycles, {} records",
        engine.cycles(),
        engine.store().len()
    );

    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&engine.store().snapshot())?);
    }

    Ok(())
}
