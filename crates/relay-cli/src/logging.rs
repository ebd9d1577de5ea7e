use clap::Args;
use relay_sim::LoggingConfig;
use tracing_subscriber::EnvFilter;

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the log format (text, json).
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

/// Install the global subscriber. `RUST_LOG` wins over both the flag and
/// the scenario's `[logging]` table.
pub fn init(args: &LogArgs, config: Option<&LoggingConfig>) -> anyhow::Result<()> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);
    let level = args.log_level.as_deref().unwrap_or(&config.level);
    let format = args.log_format.as_deref().unwrap_or(&config.format);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        "json" => builder.json().init(),
        "text" => builder.init(),
        other => anyhow::bail!("unknown log format '{}', expected text or json", other),
    }
    Ok(())
}
