//! Per-round configuration.

use std::collections::BTreeSet;

use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::deck::DeckId;

/// Settings a round is started with.
///
/// Built fresh from the session's setup selections on every round start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct RoundConfig {
    /// Decks whose words make up the pool.
    selected_topics: BTreeSet<DeckId>,
    /// How many players are imposters. Never below one.
    #[setters(skip)]
    imposter_count: usize,
    /// Whether imposters see the deck hint.
    hints_enabled: bool,
}

impl RoundConfig {
    /// Creates a configuration; an imposter count of zero is raised to one.
    pub fn new(
        selected_topics: impl IntoIterator<Item = DeckId>,
        imposter_count: usize,
        hints_enabled: bool,
    ) -> Self {
        Self {
            selected_topics: selected_topics.into_iter().collect(),
            imposter_count: imposter_count.max(1),
            hints_enabled,
        }
    }

    /// Returns a copy with a different imposter count (minimum one).
    pub fn with_imposter_count(mut self, imposter_count: usize) -> Self {
        self.imposter_count = imposter_count.max(1);
        self
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new([], 1, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_imposters_raised_to_one() {
        let config = RoundConfig::new([DeckId::from("food")], 0, false);
        assert_eq!(*config.imposter_count(), 1);
        assert_eq!(*config.clone().with_imposter_count(0).imposter_count(), 1);
    }

    #[test]
    fn test_setters() {
        let config = RoundConfig::default()
            .with_hints_enabled(false)
            .with_imposter_count(2);
        assert!(!config.hints_enabled());
        assert_eq!(*config.imposter_count(), 2);
    }
}
