//! Sequential private reveal of each player's card.
//!
//! The device is passed from player to player. A player opens their card,
//! closes it again, and only then may the device move on. There is no way
//! back to an earlier card.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::assign::{Assignment, RoleAssignment};
use crate::error::RevealError;

/// Where the sequencer is in the reveal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    /// The card at the cursor has not been opened yet.
    AwaitingView(usize),
    /// The card at the cursor has been opened at least once.
    Viewed {
        /// Position in the assignment.
        cursor: usize,
        /// Whether the card is showing right now.
        open: bool,
    },
    /// Every player has seen their card.
    Complete,
}

impl RevealState {
    /// Cursor of the current card, or `None` once complete.
    pub fn cursor(&self) -> Option<usize> {
        match self {
            RevealState::AwaitingView(cursor) | RevealState::Viewed { cursor, .. } => {
                Some(*cursor)
            }
            RevealState::Complete => None,
        }
    }

    /// Returns true if a card face is currently showing.
    pub fn is_open(&self) -> bool {
        matches!(self, RevealState::Viewed { open: true, .. })
    }
}

/// Walks an [`Assignment`] one player at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSequencer {
    assignment: Assignment,
    state: RevealState,
}

impl RevealSequencer {
    /// Starts a reveal at the first player.
    #[instrument(skip(assignment), fields(cards = assignment.len()))]
    pub fn new(assignment: Assignment) -> Self {
        let state = if assignment.is_empty() {
            RevealState::Complete
        } else {
            RevealState::AwaitingView(0)
        };
        debug!(?state, "Reveal started");
        Self { assignment, state }
    }

    /// Current state.
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// The assignment being revealed.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the assignment, ending the reveal.
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Returns true once every card has been passed.
    pub fn is_complete(&self) -> bool {
        self.state == RevealState::Complete
    }

    /// Name of the player whose turn it is, without exposing their role.
    pub fn current_player(&self) -> Option<&str> {
        self.state
            .cursor()
            .and_then(|cursor| self.assignment.card(cursor))
            .map(|card| card.name().as_str())
    }

    /// The current card, but only while it is open.
    pub fn visible_card(&self) -> Option<&RoleAssignment> {
        match self.state {
            RevealState::Viewed { cursor, open: true } => self.assignment.card(cursor),
            _ => None,
        }
    }

    /// Returns true if the current card has been opened and closed again.
    pub fn can_advance(&self) -> bool {
        matches!(self.state, RevealState::Viewed { open: false, .. })
    }

    /// Opens the current card and returns it.
    ///
    /// A card that was opened and closed may be opened again.
    #[instrument(skip(self))]
    pub fn open(&mut self) -> Result<&RoleAssignment, RevealError> {
        let cursor = match self.state {
            RevealState::AwaitingView(cursor) | RevealState::Viewed { cursor, .. } => cursor,
            RevealState::Complete => {
                warn!("Open refused: reveal complete");
                return Err(RevealError::RoundComplete);
            }
        };
        self.state = RevealState::Viewed { cursor, open: true };
        debug!(cursor, "Card opened");
        self.assignment
            .card(cursor)
            .ok_or(RevealError::RoundComplete)
    }

    /// Closes the current card, remembering that it has been seen.
    #[instrument(skip(self))]
    pub fn close(&mut self) -> Result<(), RevealError> {
        match self.state {
            RevealState::Viewed { cursor, open: true } => {
                self.state = RevealState::Viewed {
                    cursor,
                    open: false,
                };
                debug!(cursor, "Card closed");
                Ok(())
            }
            RevealState::Complete => Err(RevealError::RoundComplete),
            _ => {
                warn!(state = ?self.state, "Close refused: card not open");
                Err(RevealError::CardNotOpen)
            }
        }
    }

    /// Passes the device to the next player.
    ///
    /// Only allowed once the current card has been opened and closed.
    /// Returns the new state.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Result<RevealState, RevealError> {
        let cursor = match self.state {
            RevealState::Viewed {
                cursor,
                open: false,
            } => cursor,
            RevealState::Viewed { open: true, .. } => {
                warn!("Advance refused: card still open");
                return Err(RevealError::CardStillOpen);
            }
            RevealState::AwaitingView(cursor) => {
                warn!(cursor, "Advance refused: card not viewed");
                return Err(RevealError::NotViewed(cursor));
            }
            RevealState::Complete => {
                warn!("Advance refused: reveal complete");
                return Err(RevealError::RoundComplete);
            }
        };

        let next = cursor + 1;
        self.state = if next < self.assignment.len() {
            RevealState::AwaitingView(next)
        } else {
            info!("All players have seen their cards");
            RevealState::Complete
        };
        debug!(state = ?self.state, "Advanced");
        Ok(self.state)
    }
}
