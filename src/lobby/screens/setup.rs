//! Setup screen — enter players, choose topics, imposter count and hints.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strictly_imposter::{DeckId, MIN_PLAYERS, Session};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, info, instrument, warn};

use super::layout::{frame_rows, next_index, previous_index, render_help, render_message, render_title};
use crate::lobby::screen::{Screen, ScreenTransition};

/// Which part of the setup screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum Focus {
    /// Typing a new player name.
    NameInput,
    /// The player list.
    Players,
    /// The topic list.
    Topics,
    /// Imposter count and hint toggle.
    Options,
    /// The start button.
    Start,
}

impl Focus {
    fn next(self) -> Self {
        let all: Vec<Focus> = Focus::iter().collect();
        let i = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    fn previous(self) -> Self {
        let all: Vec<Focus> = Focus::iter().collect();
        let i = all.iter().position(|f| *f == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }

    fn help(self) -> &'static str {
        match self {
            Focus::NameInput => "Type a name, Enter: Add | Tab: Next | F5: Start | Esc: Quit",
            Focus::Players => "↑↓: Select | Del/d: Remove | Tab: Next | F5: Start | Esc: Quit",
            Focus::Topics => "↑↓: Select | Space/Enter: Toggle | a: All | Tab: Next | Esc: Quit",
            Focus::Options => "↑↓: Select | ←→/Space: Change | Tab: Next | F5: Start | Esc: Quit",
            Focus::Start => "Enter: Start round | Tab: Next | Esc: Quit",
        }
    }
}

/// Rows of the options box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
enum SetupOption {
    ImposterCount,
    Hints,
}

/// State for the setup screen.
#[derive(Debug, Getters)]
pub struct SetupScreen {
    focus: Focus,
    name_input: String,
    players_state: ListState,
    topics_state: ListState,
    options_state: ListState,
}

impl SetupScreen {
    /// Creates a setup screen with the cursor in the name field.
    #[instrument(skip(session))]
    pub fn new(session: &Session) -> Self {
        debug!(players = session.roster().len(), "Initializing SetupScreen");
        let mut players_state = ListState::default();
        if !session.roster().is_empty() {
            players_state.select(Some(0));
        }
        let mut topics_state = ListState::default();
        if !session.decks().is_empty() {
            topics_state.select(Some(0));
        }
        let mut options_state = ListState::default();
        options_state.select(Some(0));
        Self {
            focus: Focus::NameInput,
            name_input: String::new(),
            players_state,
            topics_state,
            options_state,
        }
    }

    #[instrument(skip(self, session))]
    fn submit_name(&mut self, session: &mut Session) {
        session.dismiss_error();
        match session.add_player(&self.name_input) {
            Ok(()) => {
                info!(players = session.roster().len(), "Player joined");
                self.name_input.clear();
                self.players_state.select(Some(session.roster().len() - 1));
            }
            Err(e) => debug!(error = %e, "Name not added"),
        }
    }

    #[instrument(skip(self, session))]
    fn remove_selected_player(&mut self, session: &mut Session) {
        let Some(index) = self.players_state.selected() else {
            return;
        };
        let Some(name) = session.roster().players().get(index).cloned() else {
            return;
        };
        if let Err(e) = session.remove_player(&name) {
            warn!(error = %e, "Could not remove player");
            return;
        }
        let len = session.roster().len();
        self.players_state
            .select(if len == 0 { None } else { Some(index.min(len - 1)) });
    }

    fn selected_topic(&self, session: &Session) -> Option<DeckId> {
        let index = self.topics_state.selected()?;
        session.decks().ids().nth(index).cloned()
    }

    #[instrument(skip(self, session))]
    fn toggle_selected_topic(&mut self, session: &mut Session) {
        if let Some(id) = self.selected_topic(session)
            && let Err(e) = session.toggle_topic(&id)
        {
            warn!(error = %e, "Could not toggle topic");
        }
    }

    #[instrument(skip(self, session))]
    fn select_all_topics(&mut self, session: &mut Session) {
        let ids: Vec<DeckId> = session.decks().ids().cloned().collect();
        for id in ids {
            if let Err(e) = session.select_topic(&id) {
                warn!(error = %e, "Could not select topic");
            }
        }
    }

    fn selected_option(&self) -> SetupOption {
        let options: Vec<SetupOption> = SetupOption::iter().collect();
        let idx = self.options_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    #[instrument(skip(self, session))]
    fn change_option(&mut self, session: &mut Session, delta: isize) {
        let result = match self.selected_option() {
            SetupOption::ImposterCount => {
                let current = *session.selections().imposter_count();
                let count = current.saturating_add_signed(delta).max(1);
                session.set_imposter_count(count)
            }
            SetupOption::Hints => {
                let enabled = !*session.selections().hints_enabled();
                session.set_hints_enabled(enabled)
            }
        };
        if let Err(e) = result {
            warn!(error = %e, "Could not change option");
        }
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    }

    fn render_players(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let cursor = if self.focus == Focus::NameInput { "_" } else { "" };
        let input = Paragraph::new(format!("{}{}", self.name_input, cursor)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.border_style(Focus::NameInput))
                .title("Add player"),
        );
        frame.render_widget(input, chunks[0]);

        let items: Vec<ListItem> = session
            .roster()
            .players()
            .iter()
            .enumerate()
            .map(|(i, name)| ListItem::new(format!("{}. {}", i + 1, name)))
            .collect();
        let title = format!("Players ({}, minimum {})", session.roster().len(), MIN_PLAYERS);
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Players))
                    .title(title),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = self.players_state.clone();
        if self.focus != Focus::Players {
            state.select(None);
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }

    fn render_choices(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let selected = session.selections().topics();
        let items: Vec<ListItem> = session
            .decks()
            .decks()
            .map(|deck| {
                let mark = if selected.contains(deck.id()) { "[x]" } else { "[ ]" };
                ListItem::new(format!("{} {} ({} words)", mark, deck.id(), deck.len()))
            })
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Topics))
                    .title("Topics"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = self.topics_state.clone();
        if self.focus != Focus::Topics {
            state.select(None);
        }
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let hints = if *session.selections().hints_enabled() {
            "on"
        } else {
            "off"
        };
        let options = vec![
            ListItem::new(format!(
                "Imposters   < {} >",
                session.selections().imposter_count()
            )),
            ListItem::new(format!("Hints       [ {} ]", hints)),
        ];
        let list = List::new(options)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Options))
                    .title("Options"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut state = self.options_state.clone();
        if self.focus != Focus::Options {
            state.select(None);
        }
        frame.render_stateful_widget(list, chunks[1], &mut state);

        let start_style = if self.focus == Focus::Start {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let start = Paragraph::new("Start round")
            .style(start_style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.border_style(Focus::Start)),
            );
        frame.render_widget(start, chunks[2]);
    }
}

impl Screen for SetupScreen {
    #[instrument(skip(self, frame, session))]
    fn render(&self, frame: &mut Frame, session: &Session) {
        let [title, body, message, help] = frame_rows(frame.area());
        render_title(frame, title, "Strictly Party — Setup");

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body);
        self.render_players(frame, columns[0], session);
        self.render_choices(frame, columns[1], session);

        let error = session
            .error()
            .as_ref()
            .map(|e| format!("{e}  (Esc to dismiss)"));
        render_message(frame, message, error.as_deref(), Color::Red);
        render_help(frame, help, self.focus.help());
    }

    #[instrument(skip(self, key, session))]
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) -> ScreenTransition {
        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return ScreenTransition::Stay;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return ScreenTransition::Stay;
            }
            KeyCode::F(5) => return ScreenTransition::StartRound,
            KeyCode::Esc => {
                if self.focus == Focus::NameInput && !self.name_input.is_empty() {
                    self.name_input.clear();
                    return ScreenTransition::Stay;
                }
                if session.error().is_some() {
                    session.dismiss_error();
                    return ScreenTransition::Stay;
                }
                info!("Quitting from setup");
                return ScreenTransition::Quit;
            }
            _ => {}
        }

        match self.focus {
            Focus::NameInput => match key.code {
                KeyCode::Enter => self.submit_name(session),
                KeyCode::Backspace => {
                    self.name_input.pop();
                }
                KeyCode::Char(c) => self.name_input.push(c),
                _ => {}
            },
            Focus::Players => {
                let len = session.roster().len();
                match key.code {
                    KeyCode::Up => self
                        .players_state
                        .select(previous_index(self.players_state.selected(), len)),
                    KeyCode::Down => self
                        .players_state
                        .select(next_index(self.players_state.selected(), len)),
                    KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('d') => {
                        self.remove_selected_player(session)
                    }
                    _ => {}
                }
            }
            Focus::Topics => {
                let len = session.decks().len();
                match key.code {
                    KeyCode::Up => self
                        .topics_state
                        .select(previous_index(self.topics_state.selected(), len)),
                    KeyCode::Down => self
                        .topics_state
                        .select(next_index(self.topics_state.selected(), len)),
                    KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected_topic(session),
                    KeyCode::Char('a') => self.select_all_topics(session),
                    _ => {}
                }
            }
            Focus::Options => {
                let len = SetupOption::iter().count();
                match key.code {
                    KeyCode::Up => self
                        .options_state
                        .select(previous_index(self.options_state.selected(), len)),
                    KeyCode::Down => self
                        .options_state
                        .select(next_index(self.options_state.selected(), len)),
                    KeyCode::Left | KeyCode::Char('-') => self.change_option(session, -1),
                    KeyCode::Right | KeyCode::Char('+') | KeyCode::Char(' ') | KeyCode::Enter => {
                        self.change_option(session, 1)
                    }
                    _ => {}
                }
            }
            Focus::Start => {
                if key.code == KeyCode::Enter {
                    return ScreenTransition::StartRound;
                }
            }
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rand::SeedableRng;
    use strictly_imposter::{Deck, DeckStore, SetupSelections, WordEntry};

    fn session() -> Session {
        let decks = DeckStore::from_decks([
            Deck::new("animals", vec![WordEntry::new("Otter", "River")]),
            Deck::new("food", vec![WordEntry::new("Pizza", "Italian")]),
        ]);
        Session::new(decks, SetupSelections::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_name(screen: &mut SetupScreen, session: &mut Session, name: &str) {
        for c in name.chars() {
            screen.handle_key(key(KeyCode::Char(c)), session);
        }
        screen.handle_key(key(KeyCode::Enter), session);
    }

    #[test]
    fn test_typing_adds_player() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        type_name(&mut screen, &mut session, "Alice");
        assert_eq!(session.roster().players(), &["Alice"]);
        assert!(screen.name_input().is_empty());
    }

    #[test]
    fn test_duplicate_keeps_input_and_shows_error() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        type_name(&mut screen, &mut session, "Bob");
        type_name(&mut screen, &mut session, "Bob");
        assert_eq!(session.roster().len(), 1);
        assert_eq!(screen.name_input(), "Bob");
        assert!(session.error().is_some());
    }

    #[test]
    fn test_q_is_typed_not_quit() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        let transition = screen.handle_key(key(KeyCode::Char('q')), &mut session);
        assert_eq!(transition, ScreenTransition::Stay);
        assert_eq!(screen.name_input(), "q");
    }

    #[test]
    fn test_toggle_topic_from_list() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        screen.handle_key(key(KeyCode::Tab), &mut session);
        screen.handle_key(key(KeyCode::Tab), &mut session);
        assert_eq!(screen.focus(), &Focus::Topics);

        screen.handle_key(key(KeyCode::Down), &mut session);
        screen.handle_key(key(KeyCode::Char(' ')), &mut session);
        assert!(session.selections().topics().contains(&DeckId::from("food")));
        assert!(!session.selections().topics().contains(&DeckId::from("animals")));
    }

    #[test]
    fn test_imposter_count_never_below_one() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        screen.handle_key(key(KeyCode::BackTab), &mut session);
        screen.handle_key(key(KeyCode::BackTab), &mut session);
        assert_eq!(screen.focus(), &Focus::Options);

        screen.handle_key(key(KeyCode::Left), &mut session);
        assert_eq!(session.selections().imposter_count(), &1);
        screen.handle_key(key(KeyCode::Right), &mut session);
        assert_eq!(session.selections().imposter_count(), &2);
    }

    #[test]
    fn test_remove_player() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        type_name(&mut screen, &mut session, "Alice");
        type_name(&mut screen, &mut session, "Bob");
        screen.handle_key(key(KeyCode::Tab), &mut session);
        screen.handle_key(key(KeyCode::Char('d')), &mut session);
        assert_eq!(session.roster().players(), &["Alice"]);
    }

    #[test]
    fn test_start_requests_round() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        assert_eq!(
            screen.handle_key(key(KeyCode::F(5)), &mut session),
            ScreenTransition::StartRound
        );
    }

    #[test]
    fn test_selecting_topic_clears_no_topic_error() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        for name in ["Alice", "Bob", "Carol"] {
            type_name(&mut screen, &mut session, name);
        }
        assert_eq!(
            screen.handle_key(key(KeyCode::F(5)), &mut session),
            ScreenTransition::StartRound
        );
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        assert!(session.start_round(&mut rng).is_err());
        assert_eq!(session.error().as_deref(), Some("Select at least one topic."));

        screen.handle_key(key(KeyCode::Tab), &mut session);
        screen.handle_key(key(KeyCode::Tab), &mut session);
        screen.handle_key(key(KeyCode::Char(' ')), &mut session);
        assert!(session.selections().topics().contains(&DeckId::from("animals")));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_esc_dismisses_error_before_quitting() {
        let mut session = session();
        let mut screen = SetupScreen::new(&session);
        type_name(&mut screen, &mut session, "Bob");
        type_name(&mut screen, &mut session, "Bob");
        screen.handle_key(key(KeyCode::Esc), &mut session);
        assert!(session.error().is_some());

        assert_eq!(
            screen.handle_key(key(KeyCode::Esc), &mut session),
            ScreenTransition::Stay
        );
        assert!(session.error().is_none());
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc), &mut session),
            ScreenTransition::Quit
        );
    }
}
