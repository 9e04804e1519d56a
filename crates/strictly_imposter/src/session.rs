//! The game session: single owner of every piece of game state.
//!
//! A front end holds one [`Session`] and forwards user events to it. The
//! session checks that each event is legal in the current [`Phase`] and
//! drives the round lifecycle:
//!
//! ```text
//! Setup --start_round--> Revealing --advance (last)--> Finished
//!   ^                                                     |
//!   +----------- edit_setup / new_game -------------------+
//!                Revealing <-------- play_again ----------+
//! ```

use std::collections::BTreeSet;

use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::assign::{Assignment, RoleAssignment, assign_roles};
use crate::config::RoundConfig;
use crate::contracts::StartRound;
use crate::deck::{DeckId, DeckStore};
use crate::disclosure::reveal_imposters;
use crate::error::{SessionError, SetupError};
use crate::reveal::{RevealSequencer, RevealState};
use crate::roster::Roster;

/// What the players have chosen on the setup step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SetupSelections {
    /// Selected deck ids.
    topics: BTreeSet<DeckId>,
    /// Requested imposter count (at least one).
    imposter_count: usize,
    /// Whether imposters get the hint.
    hints_enabled: bool,
}

impl SetupSelections {
    /// Creates selections with no topics chosen.
    pub fn new(imposter_count: usize, hints_enabled: bool) -> Self {
        Self {
            topics: BTreeSet::new(),
            imposter_count: imposter_count.max(1),
            hints_enabled,
        }
    }

    /// Builds the configuration for a round start.
    pub fn to_round_config(&self) -> RoundConfig {
        RoundConfig::new(
            self.topics.iter().cloned(),
            self.imposter_count,
            self.hints_enabled,
        )
    }
}

impl Default for SetupSelections {
    fn default() -> Self {
        Self::new(1, true)
    }
}

/// Which step of the game the session is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Entering players and choosing topics.
    Setup,
    /// Passing the device around.
    Revealing {
        /// Reveal state machine.
        sequencer: RevealSequencer,
        /// Configuration the round was started with.
        config: RoundConfig,
    },
    /// Everyone has seen their card.
    Finished {
        /// The round's cards.
        assignment: Assignment,
        /// Configuration the round was started with.
        config: RoundConfig,
    },
}

impl Phase {
    /// Short name used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Revealing { .. } => "reveal",
            Phase::Finished { .. } => "end of round",
        }
    }
}

/// All state for one sitting of the game.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Loaded decks; fixed for the session.
    decks: DeckStore,
    /// Current players.
    roster: Roster,
    /// Current setup choices.
    selections: SetupSelections,
    /// Choices restored by a full reset.
    #[getter(skip)]
    defaults: SetupSelections,
    /// Current phase.
    phase: Phase,
    /// Imposter disclosure for the finished round, once requested.
    disclosure: Option<String>,
    /// Message for the last rejected action, until dismissed or the setup changes.
    error: Option<String>,
    /// Rounds started so far.
    rounds_started: u32,
}

impl Session {
    /// Starts a session in the setup phase with a loaded deck store.
    #[instrument(skip(decks), fields(decks = decks.len()))]
    pub fn new(decks: DeckStore, defaults: SetupSelections) -> Self {
        info!("Session created");
        Self {
            decks,
            roster: Roster::new(),
            selections: defaults.clone(),
            defaults,
            phase: Phase::Setup,
            disclosure: None,
            error: None,
            rounds_started: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Setup
    // ─────────────────────────────────────────────────────────────

    /// Adds a player. Rejected names leave the roster unchanged.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> Result<(), SessionError> {
        self.require_setup("add players")?;
        self.roster.add_player(name).map_err(|e| self.fail(e))?;
        self.error = None;
        Ok(())
    }

    /// Removes a player by name; absent names are ignored.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, name: &str) -> Result<bool, SessionError> {
        self.require_setup("remove players")?;
        let removed = self.roster.remove_player(name);
        if removed {
            self.error = None;
        }
        Ok(removed)
    }

    /// Flips whether a topic is selected. Returns the new selection state.
    #[instrument(skip(self))]
    pub fn toggle_topic(&mut self, id: &DeckId) -> Result<bool, SessionError> {
        self.require_setup("change topics")?;
        if !self.decks.contains(id) {
            return Err(self.fail(SetupError::UnknownTopic(id.clone())));
        }
        let selected = if self.selections.topics.remove(id) {
            false
        } else {
            self.selections.topics.insert(id.clone());
            true
        };
        self.error = None;
        debug!(topic = %id, selected, "Topic toggled");
        Ok(selected)
    }

    /// Selects a topic if it is not selected already.
    #[instrument(skip(self))]
    pub fn select_topic(&mut self, id: &DeckId) -> Result<(), SessionError> {
        self.require_setup("change topics")?;
        if !self.selections.topics.contains(id) {
            self.toggle_topic(id)?;
        }
        Ok(())
    }

    /// Sets the imposter count; zero is raised to one.
    #[instrument(skip(self))]
    pub fn set_imposter_count(&mut self, count: usize) -> Result<(), SessionError> {
        self.require_setup("change the imposter count")?;
        self.selections.imposter_count = count.max(1);
        self.error = None;
        Ok(())
    }

    /// Turns imposter hints on or off.
    #[instrument(skip(self))]
    pub fn set_hints_enabled(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.require_setup("change hints")?;
        self.selections.hints_enabled = enabled;
        self.error = None;
        Ok(())
    }

    /// Validates the setup and deals a new round.
    ///
    /// On a validation failure nothing but the error message changes and the
    /// session stays in setup.
    #[instrument(skip(self, rng))]
    pub fn start_round<R>(&mut self, rng: &mut R) -> Result<(), SessionError>
    where
        R: Rng + ?Sized,
    {
        self.require_setup("start a round")?;
        self.error = None;
        let config = self.selections.to_round_config();
        self.deal(config, rng)
    }

    // ─────────────────────────────────────────────────────────────
    //  Reveal
    // ─────────────────────────────────────────────────────────────

    /// The reveal sequencer, while revealing.
    pub fn reveal(&self) -> Option<&RevealSequencer> {
        match &self.phase {
            Phase::Revealing { sequencer, .. } => Some(sequencer),
            _ => None,
        }
    }

    /// Opens the current player's card.
    #[instrument(skip(self))]
    pub fn open_card(&mut self) -> Result<&RoleAssignment, SessionError> {
        let phase = self.phase.name();
        match &mut self.phase {
            Phase::Revealing { sequencer, .. } => Ok(sequencer.open()?),
            _ => Err(wrong_phase("open a card", phase)),
        }
    }

    /// Closes the current player's card.
    #[instrument(skip(self))]
    pub fn close_card(&mut self) -> Result<(), SessionError> {
        let phase = self.phase.name();
        match &mut self.phase {
            Phase::Revealing { sequencer, .. } => Ok(sequencer.close()?),
            _ => Err(wrong_phase("close a card", phase)),
        }
    }

    /// Passes the device on. After the last player the round finishes.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Result<RevealState, SessionError> {
        let phase = self.phase.name();
        let state = match &mut self.phase {
            Phase::Revealing { sequencer, .. } => sequencer.advance()?,
            _ => return Err(wrong_phase("advance", phase)),
        };

        if state == RevealState::Complete {
            let previous = std::mem::replace(&mut self.phase, Phase::Setup);
            if let Phase::Revealing { sequencer, config } = previous {
                self.phase = Phase::Finished {
                    assignment: sequencer.into_assignment(),
                    config,
                };
            }
            info!("Round finished");
        }
        Ok(state)
    }

    // ─────────────────────────────────────────────────────────────
    //  End of round
    // ─────────────────────────────────────────────────────────────

    /// The finished round's cards.
    pub fn finished_assignment(&self) -> Option<&Assignment> {
        match &self.phase {
            Phase::Finished { assignment, .. } => Some(assignment),
            _ => None,
        }
    }

    /// Reveals who the imposters were.
    #[instrument(skip(self))]
    pub fn reveal_imposters(&mut self) -> Result<&str, SessionError> {
        let Phase::Finished { assignment, .. } = &self.phase else {
            return Err(wrong_phase("reveal the imposters", self.phase.name()));
        };
        let text = reveal_imposters(assignment.cards());
        info!("Imposters disclosed");
        Ok(self.disclosure.insert(text).as_str())
    }

    /// Deals a new round for the same players and setup.
    #[instrument(skip(self, rng))]
    pub fn play_again<R>(&mut self, rng: &mut R) -> Result<(), SessionError>
    where
        R: Rng + ?Sized,
    {
        let config = match &self.phase {
            Phase::Finished { config, .. } => config.clone(),
            other => return Err(wrong_phase("play again", other.name())),
        };
        self.clear_messages();
        self.deal(config, rng)
    }

    /// Returns to setup, keeping players and topic choices.
    #[instrument(skip(self))]
    pub fn edit_setup(&mut self) -> Result<(), SessionError> {
        self.require_finished("edit the setup")?;
        self.clear_messages();
        self.phase = Phase::Setup;
        info!("Back to setup");
        Ok(())
    }

    /// Returns to setup with no players and no topics selected.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<(), SessionError> {
        self.require_finished("start a new game")?;
        self.clear_messages();
        self.roster.clear();
        self.selections = self.defaults.clone();
        self.phase = Phase::Setup;
        info!("New game");
        Ok(())
    }

    /// Clears the current error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn deal<R>(&mut self, config: RoundConfig, rng: &mut R) -> Result<(), SessionError>
    where
        R: Rng + ?Sized,
    {
        let pool = StartRound::check(&self.decks, &self.roster, &config).map_err(|e| self.fail(e))?;
        let assignment =
            assign_roles(&self.roster, &config, &pool, rng).map_err(|e| self.fail(e))?;
        self.rounds_started += 1;
        info!(
            round = self.rounds_started,
            players = self.roster.len(),
            imposters = *config.imposter_count(),
            "Round started"
        );
        self.phase = Phase::Revealing {
            sequencer: RevealSequencer::new(assignment),
            config,
        };
        Ok(())
    }

    fn clear_messages(&mut self) {
        self.disclosure = None;
        self.error = None;
    }

    /// Records a user-facing error message and converts it.
    fn fail(&mut self, err: impl Into<SessionError>) -> SessionError {
        let err = err.into();
        warn!(error = %err, "Action rejected");
        self.error = Some(err.to_string());
        err
    }

    fn require_setup(&self, action: &'static str) -> Result<(), SessionError> {
        match self.phase {
            Phase::Setup => Ok(()),
            ref other => Err(wrong_phase(action, other.name())),
        }
    }

    fn require_finished(&self, action: &'static str) -> Result<(), SessionError> {
        match self.phase {
            Phase::Finished { .. } => Ok(()),
            ref other => Err(wrong_phase(action, other.name())),
        }
    }
}

fn wrong_phase(action: &'static str, phase: &'static str) -> SessionError {
    warn!(action, phase, "Action not available in this phase");
    SessionError::WrongPhase { action, phase }
}
