//! Screen trait and transition type for the party state machine.

use crossterm::event::KeyEvent;
use ratatui::Frame;
use strictly_imposter::Session;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController). Transitions that need
/// randomness are carried out by the controller, which owns the rng.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Validate the setup and deal a round.
    StartRound,
    /// Every card has been passed; show the end-of-round screen.
    GoToRoundEnd,
    /// Deal again with the same players and setup.
    PlayAgain,
    /// Back to setup, keeping players and topics.
    EditSetup,
    /// Back to setup with nothing selected.
    NewGame,
    /// Exit the application.
    Quit,
}

/// Trait implemented by each screen that works on a loaded session.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, session: &Session);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) -> ScreenTransition;
}
