//! AIrWAVE CLI entry point.

use clap::Parser;

use airwave::cli::{commands, Cli, Commands};
use airwave::infrastructure::{logging, ConfigLoader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _guard = logging::init(&config.logging)?;

    match cli.command {
        Commands::Steps => commands::steps::execute(cli.json),
        Commands::Session(args) => commands::session::execute(args, &config, cli.json).await?,
    }

    Ok(())
}
