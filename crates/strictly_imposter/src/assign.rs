//! Secret role assignment for one round.
//!
//! One word is drawn from the pool and a fixed number of players are sampled
//! without replacement to be imposters. Everyone else is told the word.

use derive_getters::Getters;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};

use crate::config::RoundConfig;
use crate::contracts::{EnoughPlayersForImposters, PoolNotEmpty};
use crate::deck::{WordEntry, WordPool};
use crate::error::SetupError;
use crate::roster::Roster;

/// Structural break between an imposter's prompt and their partner list.
///
/// Display surfaces render it as a blank line.
pub const INFO_BREAK: &str = "\n\n";

/// Label introducing the other imposters' names.
pub const PARTNERS_LABEL: &str = "Your partners: ";

/// Separator between names in partner lists and disclosures.
pub const NAME_SEPARATOR: &str = ", ";

/// Info shown to imposters when hints are off.
pub const NO_HINT_PROMPT: &str = "Figure out the secret word!";

/// Info shown to everyone who knows the word.
pub const NOT_IMPOSTER_NOTICE: &str = "You are NOT the imposter";

/// What a player is told on their card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Role {
    /// Does not know the word.
    #[display("Imposter")]
    Imposter,
    /// Knows the secret word.
    #[display("{_0}")]
    Word(String),
}

impl Role {
    /// Returns true for the imposter marker.
    pub fn is_imposter(&self) -> bool {
        matches!(self, Role::Imposter)
    }

    /// The secret word, if this player was told it.
    pub fn word(&self) -> Option<&str> {
        match self {
            Role::Imposter => None,
            Role::Word(word) => Some(word),
        }
    }
}

/// One player's card for the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct RoleAssignment {
    /// Player name.
    pub(crate) name: String,
    /// Imposter marker or the secret word.
    pub(crate) role: Role,
    /// Guidance text; may contain [`INFO_BREAK`] before the partner list.
    pub(crate) info: String,
}

impl RoleAssignment {
    /// Returns true if this player is an imposter.
    pub fn is_imposter(&self) -> bool {
        self.role.is_imposter()
    }
}

/// Every player's card for one round, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Assignment {
    /// Cards in roster order.
    pub(crate) cards: Vec<RoleAssignment>,
    /// The drawn word and hint.
    pub(crate) secret: WordEntry,
    /// Imposter names in the order they were sampled.
    pub(crate) imposters: Vec<String>,
}

impl Assignment {
    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if there are no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at `index`, if any.
    pub fn card(&self, index: usize) -> Option<&RoleAssignment> {
        self.cards.get(index)
    }
}

/// Assigns roles to every player on the roster.
///
/// Fails without drawing if the pool is empty or the roster cannot hold the
/// imposters plus at least one player who knows the word.
#[instrument(skip_all, fields(players = roster.len(), imposters = *config.imposter_count()))]
pub fn assign_roles<R>(
    roster: &Roster,
    config: &RoundConfig,
    pool: &WordPool,
    rng: &mut R,
) -> Result<Assignment, SetupError>
where
    R: Rng + ?Sized,
{
    EnoughPlayersForImposters::check(roster, config)?;
    PoolNotEmpty::check(pool, config)?;

    let secret = pool.entries()[rng.random_range(0..pool.len())].clone();

    let players = roster.players();
    let picked = index::sample(rng, players.len(), *config.imposter_count()).into_vec();
    let imposters: Vec<String> = picked.iter().map(|&i| players[i].clone()).collect();

    let prompt = if *config.hints_enabled() {
        format!("Hint: {}", secret.hint())
    } else {
        NO_HINT_PROMPT.to_string()
    };

    let cards = players
        .iter()
        .map(|name| {
            if imposters.contains(name) {
                RoleAssignment {
                    name: name.clone(),
                    role: Role::Imposter,
                    info: imposter_info(&prompt, name, &imposters),
                }
            } else {
                RoleAssignment {
                    name: name.clone(),
                    role: Role::Word(secret.word().clone()),
                    info: NOT_IMPOSTER_NOTICE.to_string(),
                }
            }
        })
        .collect();

    let assignment = Assignment {
        cards,
        secret,
        imposters,
    };

    #[cfg(debug_assertions)]
    crate::invariants::assert_assignment(&assignment, roster, config);

    info!("Roles assigned");
    trace!(imposters = ?assignment.imposters, "Imposters sampled");
    Ok(assignment)
}

/// Builds an imposter's info text, listing the other imposters when there are any.
fn imposter_info(prompt: &str, name: &str, imposters: &[String]) -> String {
    if imposters.len() <= 1 {
        return prompt.to_string();
    }
    let partners = imposters
        .iter()
        .filter(|other| other.as_str() != name)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(NAME_SEPARATOR);
    format!("{prompt}{INFO_BREAK}{PARTNERS_LABEL}{partners}")
}
