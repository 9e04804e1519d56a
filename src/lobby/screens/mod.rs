//! Screen implementations for the party state machine.

mod layout;
mod loading;
mod reveal;
mod round_end;
mod setup;

pub use loading::{LoadFailedScreen, LoadingScreen};
pub use reveal::RevealScreen;
pub use round_end::{RoundEndOption, RoundEndScreen};
pub use setup::{Focus, SetupScreen};
