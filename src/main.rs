mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use seithi::config::SeithiConfig;

#[derive(Parser)]
#[command(name = "seithi", version, about = "Content-scoring API for classified news articles")]
struct Cli {
    /// Config file (defaults to ~/.seithi/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API server
    Serve,
    /// Print aggregate article statistics
    Stats,
    /// Show one article by id
    Inspect {
        id: String,
    },
    /// Ingest articles from a JSON file (an array of article objects)
    Import {
        file: PathBuf,
    },
    /// Check database integrity and schema version
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SeithiConfig::load_from(path)?,
        None => SeithiConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => seithi::server::serve(config).await?,
        Command::Stats => cli::stats::stats(&config)?,
        Command::Inspect { id } => cli::inspect::inspect(&config, &id)?,
        Command::Import { file } => cli::import::import(&config, &file)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
