//! Party front end: a multi-screen TUI that drives one game session.

mod controller;
mod screen;
mod screens;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
pub use screens::{
    Focus, LoadFailedScreen, LoadingScreen, RevealScreen, RoundEndOption, RoundEndScreen,
    SetupScreen,
};
