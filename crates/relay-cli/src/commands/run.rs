//! `relay run`: replay a scenario and print the batch report.

use anyhow::Context;
use clap::{Args, ValueEnum};
use relay_routing::AlgorithmKind;
use relay_sim::{ComparisonMode, ScenarioConfig, Simulation};
use std::path::PathBuf;

use crate::logging::{self, LogArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Isolated,
    Interleaved,
}

impl From<ModeArg> for ComparisonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Isolated => ComparisonMode::Isolated,
            ModeArg::Interleaved => ComparisonMode::Interleaved,
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario file (TOML).
    #[arg(default_value = "relay.toml")]
    pub config: PathBuf,

    /// Restrict the comparison to these algorithms (repeatable).
    #[arg(short, long = "algorithm")]
    pub algorithms: Vec<AlgorithmKind>,

    /// Override the comparison mode.
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Report format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &RunArgs, log: &LogArgs) -> anyhow::Result<()> {
    if !args.config.exists() {
        anyhow::bail!(
            "scenario file not found at {} (create one with 'relay init')",
            args.config.display()
        );
    }
    let mut config = ScenarioConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    logging::init(log, Some(&config.logging))?;

    // Apply CLI overrides
    if !args.algorithms.is_empty() {
        config.simulation.algorithms = args.algorithms.clone();
    }
    if let Some(mode) = args.mode {
        config.simulation.mode = mode.into();
    }

    tracing::info!("Relay Mesh v{}", env!("CARGO_PKG_VERSION"));
    let report = Simulation::new(config)?.run()?;

    match args.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}
