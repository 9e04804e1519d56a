//! First-class invariants for role assignment.
//!
//! Invariants are logical properties every freshly assigned round must
//! satisfy. They are testable independently and are asserted after each
//! assignment in debug builds.

use crate::assign::Assignment;
use crate::config::RoundConfig;
use crate::roster::Roster;

mod exact_imposter_count;
mod partners_listed;
mod roster_order;
mod shared_secret_word;

pub use exact_imposter_count::ExactImposterCountInvariant;
pub use partners_listed::PartnersListedInvariant;
pub use roster_order::RosterOrderInvariant;
pub use shared_secret_word::SharedSecretWordInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// A fresh assignment together with the inputs it was built from.
#[derive(Debug, Clone, Copy)]
pub struct RoundContext<'a> {
    /// The produced assignment.
    pub assignment: &'a Assignment,
    /// The roster it was built for.
    pub roster: &'a Roster,
    /// The configuration it was built with.
    pub config: &'a RoundConfig,
}

/// Every invariant of a freshly assigned round.
pub type AssignmentInvariants = (
    ExactImposterCountInvariant,
    SharedSecretWordInvariant,
    RosterOrderInvariant,
    PartnersListedInvariant,
);

/// Panics in debug builds if a fresh assignment breaks any invariant.
#[cfg(debug_assertions)]
pub(crate) fn assert_assignment(assignment: &Assignment, roster: &Roster, config: &RoundConfig) {
    let context = RoundContext {
        assignment,
        roster,
        config,
    };
    if let Err(violations) = AssignmentInvariants::check_all(&context) {
        for v in &violations {
            tracing::error!(invariant = %v.description, "Assignment invariant violated");
        }
        debug_assert!(violations.is_empty(), "Assignment invariants violated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::assign_roles;
    use crate::deck::{Deck, DeckId, DeckStore, WordEntry};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixture(players: usize, imposters: usize, seed: u64) -> (Assignment, Roster, RoundConfig) {
        let store = DeckStore::from_decks([Deck::new(
            "food",
            vec![
                WordEntry::new("Pizza", "Italian"),
                WordEntry::new("Taco", "Mexican"),
            ],
        )]);
        let roster: Roster = (0..players).map(|i| format!("P{i}")).collect();
        let config = RoundConfig::new([DeckId::from("food")], imposters, true);
        let pool = store
            .word_pool(config.selected_topics())
            .expect("food exists");
        let mut rng = StdRng::seed_from_u64(seed);
        let assignment = assign_roles(&roster, &config, &pool, &mut rng).expect("valid setup");
        (assignment, roster, config)
    }

    #[test]
    fn test_invariant_set_holds_across_seeds() {
        for seed in 0..50 {
            let (assignment, roster, config) = fixture(6, 2, seed);
            let context = RoundContext {
                assignment: &assignment,
                roster: &roster,
                config: &config,
            };
            assert!(AssignmentInvariants::check_all(&context).is_ok());
        }
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let (mut assignment, roster, config) = fixture(4, 1, 3);
        // Reverse the cards and promote a crewmate: order and count both break.
        assignment.cards.reverse();
        if let Some(card) = assignment.cards.iter_mut().find(|c| !c.is_imposter()) {
            card.role = crate::assign::Role::Imposter;
        }

        let context = RoundContext {
            assignment: &assignment,
            roster: &roster,
            config: &config,
        };
        let violations = AssignmentInvariants::check_all(&context).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let (assignment, roster, config) = fixture(3, 1, 9);
        let context = RoundContext {
            assignment: &assignment,
            roster: &roster,
            config: &config,
        };
        type TwoInvariants = (ExactImposterCountInvariant, SharedSecretWordInvariant);
        assert!(TwoInvariants::check_all(&context).is_ok());
    }
}
