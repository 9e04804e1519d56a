//! Party configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strictly_imposter::{DeckId, DirectorySource, LoadError, SetupSelections};
use tracing::{debug, info, instrument};

/// Where decks live and what a fresh setup looks like.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PartyConfig {
    /// Directory holding `<id>.json` deck files.
    #[serde(default = "default_decks_dir")]
    decks_dir: PathBuf,

    /// Deck ids to load. Empty means every deck in `decks_dir`.
    #[serde(default)]
    decks: Vec<String>,

    /// Imposter count a new game starts with.
    #[serde(default = "default_imposter_count")]
    default_imposter_count: usize,

    /// Whether hints start enabled.
    #[serde(default = "default_hints_enabled")]
    hints_enabled: bool,

    /// File the terminal UI writes its logs to.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_decks_dir() -> PathBuf {
    PathBuf::from("decks")
}

fn default_imposter_count() -> usize {
    1
}

fn default_hints_enabled() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_party.log")
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            decks_dir: default_decks_dir(),
            decks: Vec::new(),
            default_imposter_count: default_imposter_count(),
            hints_enabled: default_hints_enabled(),
            log_file: default_log_file(),
        }
    }
}

impl PartyConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.default_imposter_count == 0 {
            return Err(ConfigError::new(
                "default_imposter_count must be at least 1".to_string(),
            ));
        }

        info!(decks_dir = %config.decks_dir.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the deck directory (command-line override).
    pub fn with_decks_dir(mut self, decks_dir: PathBuf) -> Self {
        self.decks_dir = decks_dir;
        self
    }

    /// Selections a new game starts from.
    pub fn setup_defaults(&self) -> SetupSelections {
        SetupSelections::new(self.default_imposter_count, self.hints_enabled)
    }

    /// Deck source for the configured directory.
    pub fn deck_source(&self) -> DirectorySource {
        DirectorySource::new(self.decks_dir.clone())
    }

    /// Deck ids to load: the configured list, or every deck in the directory.
    #[instrument(skip(self))]
    pub async fn deck_ids(&self) -> Result<Vec<DeckId>, LoadError> {
        if self.decks.is_empty() {
            DirectorySource::discover(&self.decks_dir).await
        } else {
            Ok(self.decks.iter().map(|d| DeckId::from(d.as_str())).collect())
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: PartyConfig = toml::from_str("hints_enabled = false").expect("valid toml");
        assert!(!config.hints_enabled());
        assert_eq!(config.decks_dir(), &PathBuf::from("decks"));
        assert_eq!(config.default_imposter_count(), &1);
    }

    #[test]
    fn test_setup_defaults() {
        let config: PartyConfig =
            toml::from_str("default_imposter_count = 2\nhints_enabled = false").expect("valid");
        assert_eq!(config.setup_defaults(), SetupSelections::new(2, false));
    }
}
