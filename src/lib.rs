//! Strictly Party - pass-and-play imposter word game for the terminal
//!
//! The round rules live in [`strictly_imposter`]; this crate adds the
//! configuration file, the command line and the ratatui front end.
//!
//! # Architecture
//!
//! - **Config**: TOML party settings with serde defaults
//! - **CLI**: `play`, `decks` and `check` commands
//! - **Lobby**: screen state machine over a [`strictly_imposter::Session`]
//! - **TUI**: terminal setup and file logging
//!
//! # Example
//!
//! ```no_run
//! use strictly_party::{PartyConfig, run_play};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PartyConfig::load_or_default("strictly_party.toml")?;
//! run_play(config, Some(7)).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod lobby;
mod party_config;
mod tui;

// Crate-level exports - Configuration
pub use party_config::{ConfigError, PartyConfig};

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Lobby
pub use lobby::{
    Focus, LoadFailedScreen, LoadingScreen, LobbyController, RevealScreen, RoundEndOption,
    RoundEndScreen, Screen, ScreenTransition, SetupScreen,
};

// Crate-level exports - Terminal
pub use tui::{DEFAULT_LOG_FILTER, init_file_logging, round_rng, run_play};
