//! Command-line interface for strictly_party.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Strictly Party - pass-and-play imposter word game
#[derive(Parser, Debug)]
#[command(name = "strictly_party")]
#[command(about = "Pass-and-play imposter word game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the party configuration file
    #[arg(short, long, default_value = "strictly_party.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play the game in the terminal
    Play {
        /// Directory containing deck .json files (overrides the config file)
        #[arg(long)]
        decks_dir: Option<PathBuf>,

        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load the decks and list them with their word counts
    Decks {
        /// Directory containing deck .json files (overrides the config file)
        #[arg(long)]
        decks_dir: Option<PathBuf>,
    },

    /// Load the decks and report whether they are valid
    Check {
        /// Directory containing deck .json files (overrides the config file)
        #[arg(long)]
        decks_dir: Option<PathBuf>,
    },
}

impl Command {
    /// Deck directory override, if one was given.
    pub fn decks_dir(&self) -> Option<&PathBuf> {
        match self {
            Command::Play { decks_dir, .. }
            | Command::Decks { decks_dir }
            | Command::Check { decks_dir } => decks_dir.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_with_seed() {
        let cli = Cli::try_parse_from(["strictly_party", "play", "--seed", "7"]).expect("valid");
        assert!(matches!(cli.command, Command::Play { seed: Some(7), .. }));
        assert_eq!(cli.config, PathBuf::from("strictly_party.toml"));
    }

    #[test]
    fn test_decks_dir_override() {
        let cli = Cli::try_parse_from(["strictly_party", "check", "--decks-dir", "/tmp/decks"])
            .expect("valid");
        assert_eq!(cli.command.decks_dir(), Some(&PathBuf::from("/tmp/decks")));
    }
}
