//! The ordered, duplicate-free list of players.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::RosterError;

/// Minimum number of players for any round.
pub const MIN_PLAYERS: usize = 3;

/// Player names in the order they were added.
///
/// Names are trimmed on entry, never empty, and unique by exact
/// (case-sensitive) comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player to the end of the roster.
    ///
    /// Surrounding whitespace is trimmed. Empty or already-present names are
    /// rejected and the roster is left unchanged.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, name: &str) -> Result<(), RosterError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected empty player name");
            return Err(RosterError::EmptyName);
        }
        if self.contains(name) {
            warn!(name, "Rejected duplicate player name");
            return Err(RosterError::Duplicate(name.to_string()));
        }
        self.players.push(name.to_string());
        debug!(name, size = self.players.len(), "Player added");
        Ok(())
    }

    /// Removes a player by exact name. Returns false if no such player.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, name: &str) -> bool {
        match self.players.iter().position(|p| p == name) {
            Some(index) => {
                self.players.remove(index);
                debug!(name, size = self.players.len(), "Player removed");
                true
            }
            None => false,
        }
    }

    /// Removes every player.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        debug!(removed = self.players.len(), "Roster cleared");
        self.players.clear();
    }

    /// Returns true if a player with exactly this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Player names in roster order.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns true if nobody has joined.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Roster {
    /// Builds a roster, silently skipping rejected names.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut roster = Self::new();
        for name in iter {
            let _ = roster.add_player(name.as_ref());
        }
        roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_whitespace() {
        let mut roster = Roster::new();
        roster.add_player("  Alice \t").expect("valid name");
        assert_eq!(roster.players(), &["Alice".to_string()]);
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut roster = Roster::new();
        assert_eq!(roster.add_player("   "), Err(RosterError::EmptyName));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_duplicate_is_case_sensitive() {
        let mut roster = Roster::new();
        roster.add_player("Bob").expect("first add");
        assert_eq!(
            roster.add_player(" Bob"),
            Err(RosterError::Duplicate("Bob".to_string()))
        );
        roster.add_player("bob").expect("different case is a different player");
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut roster: Roster = ["Alice", "Bob"].into_iter().collect();
        assert!(!roster.remove_player("Carol"));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut roster: Roster = ["Alice", "Bob", "Carol", "Dave"].into_iter().collect();
        assert!(roster.remove_player("Bob"));
        assert_eq!(roster.players(), &["Alice", "Carol", "Dave"]);
    }

    #[test]
    fn test_clear() {
        let mut roster: Roster = ["Alice", "Bob"].into_iter().collect();
        roster.clear();
        assert!(roster.is_empty());
    }
}
