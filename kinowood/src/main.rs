//! Kinowood command-line client
//!
//! Lists, searches and inspects titles on a Kinowood backend and prints the
//! resolved playback URL for a chosen quality.

mod config;
mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinowood_client::{Fetched, KinowoodClient, LatestCatalog, Transition};
use tracing::info;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "kinowood", version, about = "Browse the Kinowood movie catalog")]
struct Cli {
    /// Path to a configuration file (TOML, YAML or JSON)
    #[arg(short, long, env = "KINOWOOD_CONFIG")]
    config: Option<String>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the default listing
    List,
    /// Search the catalog (a blank query shows the default listing)
    Search {
        /// Search text
        query: String,
    },
    /// Show details and the playback URL of a title
    Show {
        /// Movie id
        id: String,
        /// Quality label to play instead of the default
        #[arg(short, long)]
        quality: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    logging::init_logging(&config.logging)?;

    let client = KinowoodClient::new(config.client.clone()).context("Invalid client configuration")?;
    info!(api_base = client.api_base(), "Kinowood client ready");

    match cli.command {
        Command::List => {
            let catalog = LatestCatalog::new(client);
            if let Fetched::Current(page) = catalog.load().await.context("Failed to load movies")? {
                output::print_catalog(&page, catalog.client().api_base(), cli.json)?;
            }
        }
        Command::Search { query } => {
            let catalog = LatestCatalog::new(client);
            if let Fetched::Current(page) = catalog
                .search(&query)
                .await
                .context("Failed to search movies")?
            {
                output::print_catalog(&page, catalog.client().api_base(), cli.json)?;
            }
        }
        Command::Show { id, quality } => {
            let detail = client
                .fetch_detail(&id)
                .await
                .with_context(|| format!("Failed to load movie {id}"))?;

            let mut session = client.open_playback(&detail);
            if let Some(quality) = quality {
                if let Transition::Unchanged(reason) = session.change_quality(&quality) {
                    eprintln!("Keeping current stream: {reason}");
                }
            }

            output::print_detail(&detail, &session, client.api_base(), cli.json)?;
        }
    }

    Ok(())
}
