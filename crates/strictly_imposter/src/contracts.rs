//! Preconditions for starting a round.
//!
//! Each check is a small named rule. [`StartRound`] runs them in a fixed
//! order and stops at the first failure. Nothing here mutates state; a round
//! is only started once every rule has passed.

use tracing::{instrument, warn};

use crate::config::RoundConfig;
use crate::deck::{DeckStore, WordPool};
use crate::error::SetupError;
use crate::roster::{MIN_PLAYERS, Roster};

/// Precondition: at least one topic is selected.
pub struct TopicSelected;

impl TopicSelected {
    /// Fails with [`SetupError::NoTopicSelected`] on an empty selection.
    #[instrument(skip(config))]
    pub fn check(config: &RoundConfig) -> Result<(), SetupError> {
        if config.selected_topics().is_empty() {
            warn!("No topic selected");
            Err(SetupError::NoTopicSelected)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the roster has at least [`MIN_PLAYERS`] players.
pub struct EnoughPlayers;

impl EnoughPlayers {
    /// Fails with [`SetupError::InsufficientPlayers`].
    #[instrument(skip(roster))]
    pub fn check(roster: &Roster) -> Result<(), SetupError> {
        if roster.len() < MIN_PLAYERS {
            warn!(players = roster.len(), "Not enough players");
            Err(SetupError::InsufficientPlayers {
                minimum: MIN_PLAYERS,
                actual: roster.len(),
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: at least one player is left who is not an imposter.
pub struct EnoughPlayersForImposters;

impl EnoughPlayersForImposters {
    /// Fails with [`SetupError::InsufficientPlayersForImposters`].
    #[instrument(skip(roster, config))]
    pub fn check(roster: &Roster, config: &RoundConfig) -> Result<(), SetupError> {
        let imposters = *config.imposter_count();
        let required = imposters + 1;
        if roster.len() < required {
            warn!(players = roster.len(), imposters, "Too many imposters");
            Err(SetupError::InsufficientPlayersForImposters {
                required,
                imposters,
            })
        } else {
            Ok(())
        }
    }
}

/// Precondition: there is at least one word to draw.
pub struct PoolNotEmpty;

impl PoolNotEmpty {
    /// Fails with [`SetupError::EmptyWordPool`].
    #[instrument(skip(pool, config))]
    pub fn check(pool: &WordPool, config: &RoundConfig) -> Result<(), SetupError> {
        if pool.is_empty() {
            warn!("Selected topics contain no words");
            Err(SetupError::EmptyWordPool {
                topics: config
                    .selected_topics()
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for starting a round.
///
/// Order: topic selected, pool built, player minimum, imposter headroom,
/// pool non-empty. Returns the pool the role assignor draws from.
pub struct StartRound;

impl StartRound {
    /// Validates the setup and builds the word pool.
    #[instrument(skip_all)]
    pub fn check(
        decks: &DeckStore,
        roster: &Roster,
        config: &RoundConfig,
    ) -> Result<WordPool, SetupError> {
        TopicSelected::check(config)?;
        let pool = decks.word_pool(config.selected_topics())?;
        EnoughPlayers::check(roster)?;
        EnoughPlayersForImposters::check(roster, config)?;
        PoolNotEmpty::check(&pool, config)?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::{Deck, DeckId, WordEntry};

    fn store() -> DeckStore {
        DeckStore::from_decks([
            Deck::new("food", vec![WordEntry::new("Pizza", "Italian")]),
            Deck::new("empty", vec![]),
        ])
    }

    fn roster(n: usize) -> Roster {
        (0..n).map(|i| format!("Player {}", i + 1)).collect()
    }

    fn config(topics: &[&str], imposters: usize) -> RoundConfig {
        RoundConfig::new(topics.iter().map(|t| DeckId::from(*t)), imposters, true)
    }

    #[test]
    fn test_no_topic_checked_first() {
        // Roster is also too small, but the topic rule wins.
        let result = StartRound::check(&store(), &roster(1), &config(&[], 1));
        assert_eq!(result, Err(SetupError::NoTopicSelected));
    }

    #[test]
    fn test_insufficient_players() {
        for n in 0..MIN_PLAYERS {
            let result = StartRound::check(&store(), &roster(n), &config(&["food"], 1));
            assert_eq!(
                result,
                Err(SetupError::InsufficientPlayers {
                    minimum: 3,
                    actual: n
                })
            );
        }
    }

    #[test]
    fn test_insufficient_players_for_imposters_message() {
        let result = StartRound::check(&store(), &roster(3), &config(&["food"], 3));
        let err = result.expect_err("three players cannot host three imposters");
        assert_eq!(
            err,
            SetupError::InsufficientPlayersForImposters {
                required: 4,
                imposters: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "You need at least 4 players for 3 imposter(s)."
        );
    }

    #[test]
    fn test_boundary_succeeds() {
        for k in 1..6 {
            let n = (k + 1).max(MIN_PLAYERS);
            let result = StartRound::check(&store(), &roster(n), &config(&["food"], k));
            assert!(result.is_ok(), "{} players should support {} imposters", n, k);
        }
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = StartRound::check(&store(), &roster(4), &config(&["empty"], 1));
        assert_eq!(
            result,
            Err(SetupError::EmptyWordPool {
                topics: vec!["empty".to_string()]
            })
        );
    }

    #[test]
    fn test_empty_deck_alongside_full_deck_is_fine() {
        let pool = StartRound::check(&store(), &roster(3), &config(&["empty", "food"], 1))
            .expect("food deck has a word");
        assert_eq!(pool.len(), 1);
    }
}
