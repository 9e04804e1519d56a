//! Where deck data comes from.
//!
//! The store does not care whether decks live on disk or in memory; it asks a
//! [`DeckSource`] for the raw JSON of each deck id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use derive_getters::Getters;
use tracing::{debug, instrument, warn};

use crate::deck::DeckId;
use crate::error::LoadError;

/// Provider of raw deck JSON by id.
#[async_trait]
pub trait DeckSource: Send + Sync {
    /// Fetches the JSON text of one deck.
    async fn fetch(&self, id: &DeckId) -> Result<String, LoadError>;
}

/// Reads decks from `<root>/<id>.json`.
#[derive(Debug, Clone, Getters)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the file backing a deck id.
    pub fn path_for(&self, id: &DeckId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Lists the deck ids present in `root`: the stems of its `*.json` files, sorted.
    #[instrument(skip(root), fields(root = %root.as_ref().display()))]
    pub async fn discover(root: impl AsRef<Path>) -> Result<Vec<DeckId>, LoadError> {
        let root = root.as_ref();
        let mut dir = tokio::fs::read_dir(root)
            .await
            .map_err(|e| LoadError::Directory {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut ids = Vec::new();
        loop {
            let entry = dir.next_entry().await.map_err(|e| LoadError::Directory {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;
            let Some(entry) = entry else { break };
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(DeckId::from(stem));
            }
        }
        ids.sort();
        debug!(count = ids.len(), "Discovered decks");
        Ok(ids)
    }
}

#[async_trait]
impl DeckSource for DirectorySource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn fetch(&self, id: &DeckId) -> Result<String, LoadError> {
        let path = self.path_for(id);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Deck file unreadable");
            LoadError::Unreachable {
                id: id.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// In-memory decks, for embedded content and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    decks: HashMap<DeckId, String>,
}

impl StaticSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a deck's JSON text under `id`.
    pub fn with_deck(mut self, id: impl Into<DeckId>, json: impl Into<String>) -> Self {
        self.decks.insert(id.into(), json.into());
        self
    }
}

#[async_trait]
impl DeckSource for StaticSource {
    async fn fetch(&self, id: &DeckId) -> Result<String, LoadError> {
        self.decks
            .get(id)
            .cloned()
            .ok_or_else(|| LoadError::Unreachable {
                id: id.clone(),
                reason: "no such deck".to_string(),
            })
    }
}
