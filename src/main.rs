use clap::Parser;
use cosi_import::cli::{run_import, Cli};
use cosi_import::ImportConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ImportConfig::from_cli(&cli)?;
    run_import(&config)?;

    Ok(())
}
