//! End-of-round disclosure of who the imposters were.

use tracing::instrument;

use crate::assign::{NAME_SEPARATOR, RoleAssignment};

/// Names every imposter in roster order.
///
/// One imposter reads "The imposter was: X"; any other count reads
/// "The imposters were: X, Y". Pure, so calling it twice gives the same text.
#[instrument(skip_all, fields(cards = cards.len()))]
pub fn reveal_imposters(cards: &[RoleAssignment]) -> String {
    let names: Vec<&str> = cards
        .iter()
        .filter(|card| card.is_imposter())
        .map(|card| card.name().as_str())
        .collect();

    match names.as_slice() {
        [only] => format!("The imposter was: {only}"),
        _ => format!("The imposters were: {}", names.join(NAME_SEPARATOR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::Role;

    fn card(name: &str, imposter: bool) -> RoleAssignment {
        RoleAssignment {
            name: name.to_string(),
            role: if imposter {
                Role::Imposter
            } else {
                Role::Word("Pizza".into())
            },
            info: String::new(),
        }
    }

    #[test]
    fn test_singular() {
        let cards = [card("Alice", false), card("Bob", true), card("Carol", false)];
        assert_eq!(reveal_imposters(&cards), "The imposter was: Bob");
    }

    #[test]
    fn test_plural_in_roster_order() {
        let cards = [
            card("Alice", true),
            card("Bob", false),
            card("Carol", true),
            card("Dave", true),
        ];
        assert_eq!(
            reveal_imposters(&cards),
            "The imposters were: Alice, Carol, Dave"
        );
    }

    #[test]
    fn test_idempotent() {
        let cards = [card("Alice", true), card("Bob", false), card("Carol", true)];
        assert_eq!(reveal_imposters(&cards), reveal_imposters(&cards));
    }
}
