//! Reveal screen — each player privately views their card in turn.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strictly_imposter::{INFO_BREAK, RevealState, Session};
use tracing::{debug, info, instrument, warn};

use super::layout::{frame_rows, render_help, render_message, render_title};
use crate::lobby::screen::{Screen, ScreenTransition};

/// Pass-the-device card reveal.
#[derive(Debug, Default)]
pub struct RevealScreen;

impl RevealScreen {
    /// Creates the reveal screen.
    pub fn new() -> Self {
        Self
    }

    fn card_lines(session: &Session) -> Vec<Line<'static>> {
        let Some(sequencer) = session.reveal() else {
            return vec![Line::from("No round in progress.")];
        };
        let Some(player) = sequencer.current_player() else {
            return vec![Line::from("Everyone has seen their card.")];
        };

        let mut lines = vec![
            Line::from(Span::styled(
                format!("Pass the device to {}", player),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match sequencer.visible_card() {
            Some(card) => {
                let role_style = if card.is_imposter() {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(Span::styled(card.role().to_string(), role_style)));
                lines.push(Line::from(""));
                for part in card.info().split(INFO_BREAK) {
                    lines.push(Line::from(part.to_string()));
                    lines.push(Line::from(""));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    "Card hidden. Only the named player should look.",
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        lines
    }

    fn help(session: &Session) -> &'static str {
        match session.reveal().map(|s| (s.state(), s.can_advance())) {
            Some((RevealState::Viewed { open: true, .. }, _)) => "Space/Enter: Hide card | q: Quit",
            Some((_, true)) => "Space/Enter: Show card again | n/→: Pass to next player | q: Quit",
            _ => "Space/Enter: Show card | q: Quit",
        }
    }
}

impl Screen for RevealScreen {
    #[instrument(skip(self, frame, session))]
    fn render(&self, frame: &mut Frame, session: &Session) {
        let [title, body, message, help] = frame_rows(frame.area());

        let progress = session
            .reveal()
            .and_then(|s| s.state().cursor().map(|c| (c, s.assignment().len())));
        let heading = match progress {
            Some((cursor, total)) => format!("Reveal — player {} of {}", cursor + 1, total),
            None => "Reveal".to_string(),
        };
        render_title(frame, title, &heading);

        let card = Paragraph::new(Self::card_lines(session))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Your card"));
        frame.render_widget(card, body);

        render_message(frame, message, session.error().as_deref(), Color::Red);
        render_help(frame, help, Self::help(session));
    }

    #[instrument(skip(self, key, session))]
    fn handle_key(&mut self, key: KeyEvent, session: &mut Session) -> ScreenTransition {
        let Some(state) = session.reveal().map(|s| s.state()) else {
            warn!("Reveal screen shown outside a reveal");
            return ScreenTransition::GoToRoundEnd;
        };

        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                let result = if state.is_open() {
                    session.close_card()
                } else {
                    session.open_card().map(|_| ())
                };
                if let Err(e) = result {
                    debug!(error = %e, "Card toggle ignored");
                }
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Right => {
                if !session.reveal().is_some_and(|s| s.can_advance()) {
                    return ScreenTransition::Stay;
                }
                match session.advance() {
                    Ok(RevealState::Complete) => {
                        info!("All cards seen");
                        ScreenTransition::GoToRoundEnd
                    }
                    Ok(_) => ScreenTransition::Stay,
                    Err(e) => {
                        debug!(error = %e, "Advance ignored");
                        ScreenTransition::Stay
                    }
                }
            }
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

    fn revealing_session() -> Session {
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
            .start_round(&mut StdRng::seed_from_u64(3))
            .expect("valid setup");
        session
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cannot_skip_unviewed_card() {
        let mut session = revealing_session();
        let mut screen = RevealScreen::new();
        screen.handle_key(key(KeyCode::Char('n')), &mut session);
        assert_eq!(
            session.reveal().map(|s| s.state()),
            Some(RevealState::AwaitingView(0))
        );
    }

    #[test]
    fn test_cannot_advance_while_open() {
        let mut session = revealing_session();
        let mut screen = RevealScreen::new();
        screen.handle_key(key(KeyCode::Char(' ')), &mut session);
        screen.handle_key(key(KeyCode::Right), &mut session);
        assert_eq!(
            session.reveal().map(|s| s.state()),
            Some(RevealState::Viewed { cursor: 0, open: true })
        );
    }

    #[test]
    fn test_full_pass_reaches_round_end() {
        let mut session = revealing_session();
        let mut screen = RevealScreen::new();
        let mut last = ScreenTransition::Stay;
        for _ in 0..3 {
            screen.handle_key(key(KeyCode::Enter), &mut session);
            screen.handle_key(key(KeyCode::Enter), &mut session);
            last = screen.handle_key(key(KeyCode::Char('n')), &mut session);
        }
        assert_eq!(last, ScreenTransition::GoToRoundEnd);
        assert!(session.finished_assignment().is_some());
    }
}
