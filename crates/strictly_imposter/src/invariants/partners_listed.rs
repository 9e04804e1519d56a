//! Partners listed: with several imposters, each one is told who the others are.

use super::{Invariant, RoundContext};
use crate::assign::{INFO_BREAK, NAME_SEPARATOR, PARTNERS_LABEL};

/// Invariant: partner text appears exactly on imposter cards when there is
/// more than one imposter, and names every other imposter in sampling order.
pub struct PartnersListedInvariant;

impl<'a> Invariant<RoundContext<'a>> for PartnersListedInvariant {
    fn holds(ctx: &RoundContext<'a>) -> bool {
        let imposters = ctx.assignment.imposters();
        let several = imposters.len() > 1;
        let marker = format!("{INFO_BREAK}{PARTNERS_LABEL}");

        ctx.assignment.cards().iter().all(|card| {
            if card.is_imposter() && several {
                let expected = imposters
                    .iter()
                    .filter(|name| *name != card.name())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(NAME_SEPARATOR);
                card.info().ends_with(&format!("{marker}{expected}"))
            } else {
                !card.info().contains(&marker)
            }
        })
    }

    fn description() -> &'static str {
        "Imposters see their partners and nobody else sees partner text"
    }
}
