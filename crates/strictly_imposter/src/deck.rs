//! Word decks and the deck store.
//!
//! A deck is a named, ordered list of secret words with hints. Decks are
//! loaded once at startup and are read-only for the rest of the process.

use std::collections::{BTreeMap, BTreeSet};

use derive_getters::Getters;
use derive_more::{Display, From};
use derive_new::new;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{LoadError, SetupError};
use crate::source::DeckSource;

/// A secret word and the hint shown to imposters when hints are enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct WordEntry {
    /// The secret word.
    #[new(into)]
    word: String,
    /// Hint text for imposters.
    #[new(into)]
    hint: String,
}

/// Identifier of a deck, taken from its source name (e.g. `food`).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DeckId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A named, ordered collection of word entries.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Deck {
    /// Source identifier.
    id: DeckId,
    /// Entries in source order.
    entries: Vec<WordEntry>,
}

impl Deck {
    /// Creates a deck from already-parsed entries.
    pub fn new(id: impl Into<DeckId>, entries: Vec<WordEntry>) -> Self {
        Self {
            id: id.into(),
            entries,
        }
    }

    /// Parses a deck from its JSON wire form: an array of `{word, hint}` records.
    #[instrument(skip(json), fields(deck = %id))]
    pub fn from_json(id: DeckId, json: &str) -> Result<Self, LoadError> {
        let entries: Vec<WordEntry> =
            serde_json::from_str(json).map_err(|e| LoadError::Malformed {
                id: id.clone(),
                reason: e.to_string(),
            })?;
        debug!(words = entries.len(), "Parsed deck");
        Ok(Self { id, entries })
    }

    /// Number of entries in the deck.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the deck has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every deck available for the session, keyed by id.
///
/// A store is either fully populated or never constructed: [`DeckStore::load`]
/// fails as a whole if any single deck fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckStore {
    decks: BTreeMap<DeckId, Deck>,
}

impl DeckStore {
    /// Builds a store from decks that are already in memory.
    pub fn from_decks(decks: impl IntoIterator<Item = Deck>) -> Self {
        Self {
            decks: decks.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Loads every named deck from `source`.
    ///
    /// All fetches run concurrently; the first failure aborts the load and no
    /// partial store is returned.
    #[instrument(skip(source, ids))]
    pub async fn load<S>(source: &S, ids: &[DeckId]) -> Result<Self, LoadError>
    where
        S: DeckSource + ?Sized,
    {
        if ids.is_empty() {
            warn!("No decks requested");
            return Err(LoadError::NoDecks);
        }

        info!(count = ids.len(), "Loading decks");
        let decks = try_join_all(ids.iter().map(|id| async move {
            let json = source.fetch(id).await?;
            Deck::from_json(id.clone(), &json)
        }))
        .await?;

        let store = Self::from_decks(decks);
        info!(decks = store.len(), "Decks loaded");
        Ok(store)
    }

    /// Looks up a deck by id.
    pub fn get(&self, id: &DeckId) -> Option<&Deck> {
        self.decks.get(id)
    }

    /// Returns true if a deck with this id is loaded.
    pub fn contains(&self, id: &DeckId) -> bool {
        self.decks.contains_key(id)
    }

    /// Deck ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &DeckId> {
        self.decks.keys()
    }

    /// Decks in id order.
    pub fn decks(&self) -> impl Iterator<Item = &Deck> {
        self.decks.values()
    }

    /// Each deck id with its word count, in id order.
    pub fn deck_sizes(&self) -> impl Iterator<Item = (&DeckId, usize)> {
        self.decks.iter().map(|(id, deck)| (id, deck.len()))
    }

    /// Number of loaded decks.
    pub fn len(&self) -> usize {
        self.decks.len()
    }

    /// Returns true if no decks are loaded.
    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    /// Builds the combined word pool for a topic selection.
    ///
    /// Entries are concatenated in deck-id order, keeping duplicates across
    /// decks. Every selected topic must exist in the store.
    #[instrument(skip(self))]
    pub fn word_pool(&self, topics: &BTreeSet<DeckId>) -> Result<WordPool, SetupError> {
        let mut entries = Vec::new();
        for topic in topics {
            let deck = self
                .decks
                .get(topic)
                .ok_or_else(|| SetupError::UnknownTopic(topic.clone()))?;
            entries.extend(deck.entries.iter().cloned());
        }
        debug!(words = entries.len(), "Built word pool");
        Ok(WordPool { entries })
    }
}

/// The combined entries of every selected deck for one round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    entries: Vec<WordEntry>,
}

impl WordPool {
    /// Entries in pool order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Number of entries, counting duplicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there is nothing to draw from.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
