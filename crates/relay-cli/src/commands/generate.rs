//! `relay generate`: append a random batch of sends to a scenario.

use anyhow::Context;
use clap::Args;
use relay_core::NodeId;
use relay_sim::{workload, ScenarioConfig, WorkloadSpec};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Scenario file to extend.
    #[arg(default_value = "relay.toml")]
    pub config: PathBuf,

    /// Number of sends to add.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// Largest payload size in bytes.
    #[arg(long, default_value_t = 16)]
    pub max_size: u64,

    /// RNG seed (falls back to the scenario's seed, then to entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace the existing sends instead of appending.
    #[arg(long)]
    pub replace: bool,
}

pub fn run(args: &GenerateArgs) -> anyhow::Result<()> {
    if !args.config.exists() {
        anyhow::bail!("scenario file not found at {}", args.config.display());
    }
    let mut config = ScenarioConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    let ids: Vec<NodeId> = config.nodes.iter().map(|n| n.id.clone()).collect();
    let spec = WorkloadSpec {
        count: args.count,
        max_size: args.max_size,
        seed: args.seed.or(config.simulation.seed),
    };
    let sends = workload::generate(&ids, &spec)?;

    if args.replace {
        config.sends.clear();
    }
    config.sends.extend(sends);
    config.save(&args.config)?;

    tracing::info!(added = args.count, total = config.sends.len(), "generated workload");
    println!(
        "Added {} sends to {} ({} total)",
        args.count,
        args.config.display(),
        config.sends.len()
    );
    Ok(())
}
