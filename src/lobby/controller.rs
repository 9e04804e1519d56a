//! Lobby controller — the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use derive_getters::Getters;
use ratatui::{Terminal, backend::Backend};
use rand::rngs::StdRng;
use strictly_imposter::{DeckStore, LoadError, Phase, Session};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument, warn};

use crate::PartyConfig;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{
    LoadFailedScreen, LoadingScreen, RevealScreen, RoundEndScreen, SetupScreen,
};

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    Setup(SetupScreen),
    Reveal(RevealScreen),
    RoundEnd(RoundEndScreen),
}

impl ActiveScreen {
    /// The screen that matches the session's phase.
    fn for_phase(session: &Session) -> Self {
        match session.phase() {
            Phase::Setup => ActiveScreen::Setup(SetupScreen::new(session)),
            Phase::Revealing { .. } => ActiveScreen::Reveal(RevealScreen::new()),
            Phase::Finished { .. } => ActiveScreen::RoundEnd(RoundEndScreen::new()),
        }
    }

    fn as_screen(&self) -> &dyn Screen {
        match self {
            ActiveScreen::Setup(s) => s,
            ActiveScreen::Reveal(s) => s,
            ActiveScreen::RoundEnd(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            ActiveScreen::Setup(s) => s,
            ActiveScreen::Reveal(s) => s,
            ActiveScreen::RoundEnd(s) => s,
        }
    }
}

/// Controller that loads the decks and drives the game screens.
///
/// Call [`LobbyController::run`] to start the event loop.
#[derive(Debug, Getters)]
pub struct LobbyController {
    config: PartyConfig,
    #[getter(skip)]
    rng: StdRng,
}

impl LobbyController {
    /// Creates a controller that deals rounds with `rng`.
    #[instrument(skip(config, rng))]
    pub fn new(config: PartyConfig, rng: StdRng) -> Self {
        info!("Creating LobbyController");
        Self { config, rng }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Decks load in the background while a loading screen is shown. A load
    /// failure blocks the game behind an error screen.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let decks = match self.load_decks(terminal).await? {
            Some(Ok(decks)) => decks,
            Some(Err(e)) => {
                error!(error = %e, "Deck loading failed");
                return self.show_load_failure(terminal, e.to_string()).await;
            }
            None => {
                info!("Quit while loading");
                return Ok(());
            }
        };

        let mut session = Session::new(decks, self.config.setup_defaults());
        let mut screen = ActiveScreen::for_phase(&session);

        loop {
            terminal.draw(|f| screen.as_screen().render(f, &session))?;

            if let Some(key) = poll_key()? {
                let transition = screen.as_screen_mut().handle_key(key, &mut session);
                screen = match self.apply_transition(transition, screen, &mut session) {
                    Some(next) => next,
                    None => {
                        info!(rounds = session.rounds_started(), "Lobby quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Loads decks on a background task while animating the loading screen.
    ///
    /// Returns `None` if the user quit before loading finished.
    #[instrument(skip(self, terminal))]
    async fn load_decks<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<Option<Result<DeckStore, LoadError>>>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        let config = self.config.clone();
        let task = tokio::spawn(async move {
            match config.deck_ids().await {
                Ok(ids) => DeckStore::load(&config.deck_source(), &ids).await,
                Err(e) => Err(e),
            }
        });

        let mut loading = LoadingScreen::new();
        while !task.is_finished() {
            terminal.draw(|f| loading.render(f))?;
            if let Some(key) = poll_key()?
                && loading.handle_key(key) == ScreenTransition::Quit
            {
                task.abort();
                return Ok(None);
            }
            loading.tick();
            sleep(Duration::from_millis(10)).await;
        }

        let result = task.await?;
        if let Ok(decks) = &result {
            info!(decks = decks.len(), "Decks loaded");
        }
        Ok(Some(result))
    }

    /// Shows the blocking load error until the user quits.
    #[instrument(skip(self, terminal))]
    async fn show_load_failure<B: Backend>(
        &self,
        terminal: &mut Terminal<B>,
        message: String,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        let mut screen = LoadFailedScreen::new(message);
        loop {
            terminal.draw(|f| screen.render(f))?;
            if let Some(key) = poll_key()?
                && screen.handle_key(key) == ScreenTransition::Quit
            {
                return Ok(());
            }
            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current, session))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
        session: &mut Session,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, phase = session.phase().name(), "Applying screen transition");
        let result = match transition {
            ScreenTransition::Stay => return Some(current),
            ScreenTransition::Quit => return None,
            ScreenTransition::GoToRoundEnd => Ok(()),
            ScreenTransition::StartRound => session.start_round(&mut self.rng),
            ScreenTransition::PlayAgain => session.play_again(&mut self.rng),
            ScreenTransition::EditSetup => session.edit_setup(),
            ScreenTransition::NewGame => session.new_game(),
        };

        if let Err(e) = result {
            // Validation failures stay on the current screen with the message shown.
            warn!(error = %e, "Transition rejected");
            return Some(current);
        }

        let next = ActiveScreen::for_phase(session);
        info!(phase = session.phase().name(), "Navigating");
        Some(next)
    }
}

/// Waits briefly for a key press. Release events are skipped.
fn poll_key() -> std::io::Result<Option<KeyEvent>> {
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(Some(key));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use strictly_imposter::{Deck, DeckId, SetupSelections, WordEntry};

    fn controller() -> LobbyController {
        LobbyController::new(PartyConfig::default(), StdRng::seed_from_u64(11))
    }

    fn session() -> Session {
        let decks = DeckStore::from_decks([Deck::new(
            "food",
            vec![WordEntry::new("Pizza", "Italian")],
        )]);
        Session::new(decks, SetupSelections::default())
    }

    #[test]
    fn test_rejected_start_stays_on_setup() {
        let mut controller = controller();
        let mut session = session();
        let screen = ActiveScreen::for_phase(&session);
        let next = controller
            .apply_transition(ScreenTransition::StartRound, screen, &mut session)
            .expect("not quitting");
        assert!(matches!(next, ActiveScreen::Setup(_)));
        assert_eq!(
            session.error().as_deref(),
            Some("Select at least one topic.")
        );
    }

    #[test]
    fn test_start_then_new_game() {
        let mut controller = controller();
        let mut session = session();
        for name in ["Alice", "Bob", "Carol"] {
            session.add_player(name).expect("valid name");
        }
        session.select_topic(&DeckId::from("food")).expect("known topic");

        let screen = ActiveScreen::for_phase(&session);
        let screen = controller
            .apply_transition(ScreenTransition::StartRound, screen, &mut session)
            .expect("not quitting");
        assert!(matches!(screen, ActiveScreen::Reveal(_)));

        for _ in 0..3 {
            session.open_card().expect("open");
            session.close_card().expect("close");
            session.advance().expect("advance");
        }
        let screen = controller
            .apply_transition(ScreenTransition::GoToRoundEnd, screen, &mut session)
            .expect("not quitting");
        assert!(matches!(screen, ActiveScreen::RoundEnd(_)));

        let screen = controller
            .apply_transition(ScreenTransition::NewGame, screen, &mut session)
            .expect("not quitting");
        assert!(matches!(screen, ActiveScreen::Setup(_)));
        assert!(session.roster().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut controller = controller();
        let mut session = session();
        let screen = ActiveScreen::for_phase(&session);
        assert!(
            controller
                .apply_transition(ScreenTransition::Quit, screen, &mut session)
                .is_none()
        );
    }
}
