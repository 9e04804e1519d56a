//! Round end screen — disclose the imposters and choose what happens next.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use strictly_imposter::Session;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument, warn};

use super::layout::{frame_rows, next_index, previous_index, render_help, render_message, render_title};
use crate::lobby::screen::{Screen, ScreenTransition};

/// Actions offered once every card has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum RoundEndOption {
    /// Show who the imposters were.
    #[strum(to_string = "Reveal imposters")]
    RevealImposters,
    /// Same players and setup, fresh deal.
    #[strum(to_string = "Play again")]
    PlayAgain,
    /// Back to setup keeping players and topics.
    #[strum(to_string = "Edit setup")]
    EditSetup,
    /// Back to an empty setup.
    #[strum(to_string = "New game")]
    NewGame,
    /// Leave the game.
    Quit,
}

/// State for the round end menu.
#[derive(Debug, Getters)]
pub struct RoundEndScreen {
    list_state: ListState,
}

impl RoundEndScreen {
    /// Creates the menu with the first option selected.
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self { list_state }
    }

    /// Options currently on offer. Reveal drops out once it has been used.
    pub fn options(session: &Session) -> Vec<RoundEndOption> {
        RoundEndOption::iter()
            .filter(|o| *o != RoundEndOption::RevealImposters || session.disclosure().is_none())
            .collect()
    }

    fn selected(&self, session: &Session) -> Option<RoundEndOption> {
        let options = Self::options(session);
        self.list_state.selected().and_then(|i| options.get(i).copied())
    }

    #[instrument(skip(self, session))]
    fn choose(&mut self, option: RoundEndOption, session: &mut Session) -> ScreenTransition {
        info!(option = %option, "Round end option chosen");
        match option {
            RoundEndOption::RevealImposters => {
                if let Err(e) = session.reveal_imposters() {
                    warn!(error = %e, "Could not reveal imposters");
                }
                self.list_state.select(Some(0));
                ScreenTransition::Stay
            }
            RoundEndOption::PlayAgain => ScreenTransition::PlayAgain,
            RoundEndOption::EditSetup => ScreenTransition::EditSetup,
            RoundEndOption::NewGame => ScreenTransition::NewGame,
            RoundEndOption::Quit => ScreenTransition::Quit,
        }
    }
}

impl Default for RoundEndScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for RoundEndScreen {
    #[instrument(skip(self, frame, session))]
    fn render(&self, frame: &mut Frame, session: &Session) {
        let [title, body, message, help] = frame_rows(frame.area());
        render_title(frame, title, "Round over");

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(5)])
            .split(body);

        let (text, style) = match session.disclosure() {
            Some(text) => (
                text.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            None => (
                "Discuss, vote, then reveal the imposters.".to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        };
        let disclosure = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(disclosure, chunks[0]);

        let items: Vec<ListItem> = Self::options(session)
            .into_iter()
            .map(|o| ListItem::new(o.to_string()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("What next?"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = self.list_state.clone();
        frame.render_stateful_widget(list, chunks[1], &mut state);

        render_message(frame, message, session.error().as_deref(), Color::Red);
        render_help(frame, help, "↑↓: Navigate | Enter: Select | q: Quit");
    }

    #[instrument(skip(self, key, session))]
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) -> ScreenTransition {
        let len = Self::options(session).len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list_state
                    .select(previous_index(self.list_state.selected(), len));
                ScreenTransition::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list_state
                    .select(next_index(self.list_state.selected(), len));
                ScreenTransition::Stay
            }
            KeyCode::Enter => match self.selected(session) {
                Some(option) => self.choose(option, session),
                None => {
                    debug!("No option selected");
                    ScreenTransition::Stay
                }
            },
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rand::{SeedableRng, rngs::StdRng};
    use strictly_imposter::{Deck, DeckId, DeckStore, SetupSelections, WordEntry};

    fn finished_session() -> Session {
        let decks = DeckStore::from_decks([Deck::new(
            "food",
            vec![WordEntry::new("Pizza", "Italian")],
        )]);
        let mut session = Session::new(decks, SetupSelections::default());
        for name in ["Alice", "Bob", "Carol"] {
            session.add_player(name).expect("valid name");
        }
        session.select_topic(&DeckId::from("food")).expect("known topic");
        session
            .start_round(&mut StdRng::seed_from_u64(5))
            .expect("valid setup");
        for _ in 0..3 {
            session.open_card().expect("open");
            session.close_card().expect("close");
            session.advance().expect("advance");
        }
        session
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_reveal_then_option_hidden() {
        let mut session = finished_session();
        let mut screen = RoundEndScreen::new();
        assert_eq!(RoundEndScreen::options(&session).len(), 5);

        let transition = screen.handle_key(key(KeyCode::Enter), &mut session);
        assert_eq!(transition, ScreenTransition::Stay);
        assert!(session.disclosure().is_some());
        assert_eq!(
            RoundEndScreen::options(&session).first(),
            Some(&RoundEndOption::PlayAgain)
        );
    }

    #[test]
    fn test_menu_transitions() {
        let mut session = finished_session();
        let mut screen = RoundEndScreen::new();
        screen.handle_key(key(KeyCode::Down), &mut session);
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), &mut session),
            ScreenTransition::PlayAgain
        );
        screen.handle_key(key(KeyCode::Up), &mut session);
        screen.handle_key(key(KeyCode::Up), &mut session);
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), &mut session),
            ScreenTransition::Quit
        );
    }
}
