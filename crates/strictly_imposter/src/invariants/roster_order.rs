//! Roster order: cards follow the roster, one per player.

use super::{Invariant, RoundContext};

/// Invariant: the i-th card belongs to the i-th roster player.
pub struct RosterOrderInvariant;

impl<'a> Invariant<RoundContext<'a>> for RosterOrderInvariant {
    fn holds(ctx: &RoundContext<'a>) -> bool {
        let cards = ctx.assignment.cards();
        let players = ctx.roster.players();
        cards.len() == players.len()
            && cards
                .iter()
                .zip(players)
                .all(|(card, player)| card.name() == player)
    }

    fn description() -> &'static str {
        "Cards are in roster order with one card per player"
    }
}
