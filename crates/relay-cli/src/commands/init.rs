//! `relay init`: write a sample scenario.

use clap::Args;
use relay_sim::ScenarioConfig;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Scenario file to create.
    #[arg(default_value = "relay.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!("scenario file already exists at {}", args.path.display());
    }

    let config = ScenarioConfig::sample();
    config.save(&args.path)?;
    tracing::info!(path = %args.path.display(), "wrote sample scenario");

    println!("Initialized scenario at {}", args.path.display());
    println!(
        "  {} nodes, {} edges, {} sends",
        config.nodes.len(),
        config.edges.len(),
        config.sends.len()
    );
    println!("Run 'relay run {}' to compare the routers.", args.path.display());
    Ok(())
}
