//! Error types for the imposter game.
//!
//! [`LoadError`] is fatal for a session. Everything else is recoverable and
//! is raised before any state is touched.

use derive_more::{Display, From};

use crate::deck::DeckId;

/// Deck loading failed; no decks are available.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LoadError {
    /// No deck ids were given, so there is nothing to play with.
    #[display("No decks configured")]
    NoDecks,

    /// A deck directory could not be listed.
    #[display("Could not read deck directory {path}: {reason}")]
    Directory {
        /// Directory path.
        path: String,
        /// Underlying cause.
        reason: String,
    },

    /// A deck could not be fetched.
    #[display("Deck '{id}' is unreachable: {reason}")]
    Unreachable {
        /// Deck that failed.
        id: DeckId,
        /// Underlying cause.
        reason: String,
    },

    /// A deck was fetched but is not an array of `{word, hint}` records.
    #[display("Deck '{id}' is malformed: {reason}")]
    Malformed {
        /// Deck that failed.
        id: DeckId,
        /// Parser message.
        reason: String,
    },
}

impl std::error::Error for LoadError {}

/// A player name was rejected by the roster.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RosterError {
    /// The name was empty after trimming.
    #[display("Player name cannot be empty")]
    EmptyName,

    /// A player with this exact name already exists.
    #[display("{_0} is already playing")]
    Duplicate(String),
}

impl std::error::Error for RosterError {}

/// A round could not be started with the current setup.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SetupError {
    /// No topic is selected.
    #[display("Select at least one topic.")]
    NoTopicSelected,

    /// A selected topic is not in the deck store.
    #[display("Unknown topic: {_0}")]
    UnknownTopic(DeckId),

    /// Fewer than three players.
    #[display("A minimum of {minimum} players is required.")]
    InsufficientPlayers {
        /// Minimum roster size for any round.
        minimum: usize,
        /// Current roster size.
        actual: usize,
    },

    /// Not enough players for the requested imposter count.
    #[display("You need at least {required} players for {imposters} imposter(s).")]
    InsufficientPlayersForImposters {
        /// `imposters + 1`.
        required: usize,
        /// Requested imposter count.
        imposters: usize,
    },

    /// The selected decks contain no words.
    #[display("The selected topics contain no words: {}", topics.join(", "))]
    EmptyWordPool {
        /// Selected topic ids.
        topics: Vec<String>,
    },
}

impl std::error::Error for SetupError {}

/// A reveal interaction was refused by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RevealError {
    /// The current card has not been opened yet.
    #[display("Player {_0} has not looked at their card yet")]
    NotViewed(usize),

    /// The current card is still showing.
    #[display("Close the card before passing the device on")]
    CardStillOpen,

    /// Closing a card that is not open.
    #[display("The card is not open")]
    CardNotOpen,

    /// Every player has already seen their card.
    #[display("Every player has seen their card")]
    RoundComplete,
}

impl std::error::Error for RevealError {}

/// An event reached the session in a phase that cannot handle it.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// Rejected player name.
    #[display("{_0}")]
    Roster(RosterError),

    /// Round start validation failed.
    #[display("{_0}")]
    Setup(SetupError),

    /// Reveal interaction refused.
    #[display("{_0}")]
    Reveal(RevealError),

    /// The operation is not available in the current phase.
    #[display("Cannot {action} during {phase}")]
    #[from(ignore)]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// Phase the session was in.
        phase: &'static str,
    },
}

impl std::error::Error for SessionError {}
