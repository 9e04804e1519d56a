//! Strictly Imposter - pure game logic for a pass-and-play imposter word game.
//!
//! One device is passed around a group. Every player but the imposters is
//! shown the same secret word; the imposters only get a hint (or nothing)
//! and have to blend in.
//!
//! # Architecture
//!
//! - **Decks**: word lists loaded once from a [`DeckSource`]
//! - **Roster**: ordered, duplicate-free player names
//! - **Contracts**: side-effect-free checks before a round starts
//! - **Assignment**: word draw and imposter sampling
//! - **Reveal**: explicit state machine for passing the device
//! - **Session**: the single owner of all state, driven by user events
//!
//! # Example
//!
//! ```
//! use strictly_imposter::{Deck, DeckStore, Session, SetupSelections, WordEntry};
//! use rand::SeedableRng;
//!
//! let decks = DeckStore::from_decks([Deck::new(
//!     "food",
//!     vec![WordEntry::new("Pizza", "Italian")],
//! )]);
//! let mut session = Session::new(decks, SetupSelections::default());
//! for name in ["Alice", "Bob", "Carol"] {
//!     session.add_player(name)?;
//! }
//! session.select_topic(&"food".into())?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! session.start_round(&mut rng)?;
//!
//! while session.reveal().is_some() {
//!     session.open_card()?;
//!     session.close_card()?;
//!     session.advance()?;
//! }
//! assert!(session.reveal_imposters()?.starts_with("The imposter was: "));
//! # Ok::<(), strictly_imposter::SessionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assign;
mod config;
mod contracts;
mod deck;
mod disclosure;
mod error;
mod invariants;
mod reveal;
mod roster;
mod session;
mod source;

// Crate-level exports - Decks
pub use deck::{Deck, DeckId, DeckStore, WordEntry, WordPool};
pub use source::{DeckSource, DirectorySource, StaticSource};

// Crate-level exports - Setup
pub use config::RoundConfig;
pub use contracts::{
    EnoughPlayers, EnoughPlayersForImposters, PoolNotEmpty, StartRound, TopicSelected,
};
pub use roster::{MIN_PLAYERS, Roster};

// Crate-level exports - Round
pub use assign::{
    Assignment, INFO_BREAK, NAME_SEPARATOR, NO_HINT_PROMPT, NOT_IMPOSTER_NOTICE, PARTNERS_LABEL,
    Role, RoleAssignment, assign_roles,
};
pub use disclosure::reveal_imposters;
pub use invariants::{
    AssignmentInvariants, ExactImposterCountInvariant, Invariant, InvariantSet,
    InvariantViolation, PartnersListedInvariant, RosterOrderInvariant, RoundContext,
    SharedSecretWordInvariant,
};
pub use reveal::{RevealSequencer, RevealState};

// Crate-level exports - Session
pub use session::{Phase, Session, SetupSelections};

// Crate-level exports - Errors
pub use error::{LoadError, RevealError, RosterError, SessionError, SetupError};
