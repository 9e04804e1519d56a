//! Exact imposter count: the round has exactly the requested number of imposters.

use super::{Invariant, RoundContext};

/// Invariant: exactly `imposter_count` distinct players are imposters.
///
/// Also requires at least one player who knows the word.
pub struct ExactImposterCountInvariant;

impl<'a> Invariant<RoundContext<'a>> for ExactImposterCountInvariant {
    fn holds(ctx: &RoundContext<'a>) -> bool {
        let cards = ctx.assignment.cards();
        let marked = cards.iter().filter(|c| c.is_imposter()).count();
        let expected = *ctx.config.imposter_count();

        let mut sampled = ctx.assignment.imposters().clone();
        sampled.sort();
        sampled.dedup();

        marked == expected && sampled.len() == expected && marked < cards.len()
    }

    fn description() -> &'static str {
        "Exactly the configured number of distinct players are imposters"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{Assignment, Role, RoleAssignment};
    use crate::config::RoundConfig;
    use crate::deck::{DeckId, WordEntry};
    use crate::roster::Roster;

    fn card(name: &str, role: Role) -> RoleAssignment {
        RoleAssignment {
            name: name.to_string(),
            role,
            info: String::new(),
        }
    }

    fn assignment(cards: Vec<RoleAssignment>, imposters: &[&str]) -> Assignment {
        Assignment {
            cards,
            secret: WordEntry::new("Pizza", "Italian"),
            imposters: imposters.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_one_of_three_holds() {
        let roster: Roster = ["A", "B", "C"].into_iter().collect();
        let config = RoundConfig::new([DeckId::from("food")], 1, true);
        let assignment = assignment(
            vec![
                card("A", Role::Word("Pizza".into())),
                card("B", Role::Imposter),
                card("C", Role::Word("Pizza".into())),
            ],
            &["B"],
        );
        let ctx = RoundContext {
            assignment: &assignment,
            roster: &roster,
            config: &config,
        };
        assert!(ExactImposterCountInvariant::holds(&ctx));
    }

    #[test]
    fn test_everyone_imposter_violates() {
        let roster: Roster = ["A", "B"].into_iter().collect();
        let config = RoundConfig::new([DeckId::from("food")], 2, true);
        let assignment = assignment(
            vec![card("A", Role::Imposter), card("B", Role::Imposter)],
            &["A", "B"],
        );
        let ctx = RoundContext {
            assignment: &assignment,
            roster: &roster,
            config: &config,
        };
        assert!(!ExactImposterCountInvariant::holds(&ctx));
    }

    #[test]
    fn test_too_few_imposters_violates() {
        let roster: Roster = ["A", "B", "C", "D"].into_iter().collect();
        let config = RoundConfig::new([DeckId::from("food")], 2, true);
        let assignment = assignment(
            vec![
                card("A", Role::Imposter),
                card("B", Role::Word("Pizza".into())),
                card("C", Role::Word("Pizza".into())),
                card("D", Role::Word("Pizza".into())),
            ],
            &["A"],
        );
        let ctx = RoundContext {
            assignment: &assignment,
            roster: &roster,
            config: &config,
        };
        assert!(!ExactImposterCountInvariant::holds(&ctx));
    }
}
