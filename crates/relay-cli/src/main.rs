//! Relay Mesh CLI: build scenarios and compare routing strategies on them.
//!
//! Subcommands: init, run, generate.

mod commands;
mod logging;

use clap::{Parser, Subcommand};

/// Relay Mesh: pay-per-hop message relaying with self-pricing nodes.
#[derive(Parser, Debug)]
#[command(name = "relay", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    log: logging::LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample scenario file.
    Init(commands::init::InitArgs),
    /// Run a scenario's batch through the selected routers.
    Run(commands::run::RunArgs),
    /// Append a random batch of sends to a scenario.
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => {
            logging::init(&cli.log, None)?;
            commands::init::run(args)
        }
        Commands::Run(args) => commands::run::run(args, &cli.log),
        Commands::Generate(args) => {
            logging::init(&cli.log, None)?;
            commands::generate::run(args)
        }
    }
}
