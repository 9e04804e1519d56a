//! Strictly Party - Unified CLI
//!
//! Pass-and-play imposter word game with deck inspection commands.

#![warn(missing_docs)]

use anyhow::{Result, bail};
use clap::Parser;
use strictly_imposter::{DeckStore, LoadError};
use strictly_party::{Cli, Command, DEFAULT_LOG_FILTER, PartyConfig, run_play};
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = PartyConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.command.decks_dir() {
        config = config.with_decks_dir(dir.clone());
    }

    match cli.command {
        Command::Play { seed, .. } => run_play(config, seed).await,
        Command::Decks { .. } => run_decks(config).await,
        Command::Check { .. } => run_check(config).await,
    }
}

/// List every deck with its word count.
#[instrument(skip(config))]
async fn run_decks(config: PartyConfig) -> Result<()> {
    initialize_cli_tracing();

    let decks = load(&config).await?;
    for (id, words) in decks.deck_sizes() {
        println!("{:<20} {:>5} words", id, words);
    }
    info!(decks = decks.len(), "Listed decks");
    Ok(())
}

/// Load every deck and fail loudly if any is broken.
#[instrument(skip(config))]
async fn run_check(config: PartyConfig) -> Result<()> {
    initialize_cli_tracing();

    match load(&config).await {
        Ok(decks) => {
            let words: usize = decks.deck_sizes().map(|(_, n)| n).sum();
            println!("OK: {} decks, {} words", decks.len(), words);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Deck check failed");
            bail!("deck check failed: {}", e)
        }
    }
}

async fn load(config: &PartyConfig) -> Result<DeckStore, LoadError> {
    let ids = config.deck_ids().await?;
    DeckStore::load(&config.deck_source(), &ids).await
}

#[instrument]
fn initialize_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("CLI tracing initialized");
}
