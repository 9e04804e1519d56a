//! Screens shown before a session exists: deck loading and fatal load failure.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{info, instrument};

use super::layout::{center_rect, frame_rows, render_help, render_title};
use crate::lobby::screen::ScreenTransition;

/// Shown while decks are loading. Nothing can be started from here.
#[derive(Debug, Default)]
pub struct LoadingScreen {
    ticks: usize,
}

impl LoadingScreen {
    /// Creates a loading screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the spinner.
    pub fn tick(&mut self) {
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Renders the spinner.
    pub fn render(&self, frame: &mut Frame) {
        const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
        let [title, body, _, help] = frame_rows(frame.area());
        render_title(frame, title, "Strictly Party");

        let text = format!("{} Loading decks...", SPINNER[self.ticks % SPINNER.len()]);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, center_rect(body, 30, 1));

        render_help(frame, help, "q: Quit");
    }

    /// Only quitting is possible while loading.
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}

/// Shown when decks failed to load. The session is over; relaunch to retry.
#[derive(Debug)]
pub struct LoadFailedScreen {
    message: String,
}

impl LoadFailedScreen {
    /// Creates the failure screen for `message`.
    #[instrument]
    pub fn new(message: String) -> Self {
        Self { message }
    }

    /// The failure being shown.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Renders the blocking error.
    pub fn render(&self, frame: &mut Frame) {
        let [title, body, _, help] = frame_rows(frame.area());
        render_title(frame, title, "Strictly Party");

        let text = format!(
            "CRITICAL ERROR: Could not load game words.\n\n{}\n\nFix the deck files and start the game again.",
            self.message
        );
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Load failed"));
        frame.render_widget(paragraph, body);

        render_help(frame, help, "q / Esc: Quit");
    }

    /// Quitting is the only way out.
    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("Leaving after load failure");
                ScreenTransition::Quit
            }
            _ => ScreenTransition::Stay,
        }
    }
}
