//! Shared secret word: every non-imposter is told the same word.

use super::{Invariant, RoundContext};

/// Invariant: all non-imposters share one role, the drawn word.
pub struct SharedSecretWordInvariant;

impl<'a> Invariant<RoundContext<'a>> for SharedSecretWordInvariant {
    fn holds(ctx: &RoundContext<'a>) -> bool {
        let secret = ctx.assignment.secret().word();
        ctx.assignment
            .cards()
            .iter()
            .filter_map(|c| c.role().word())
            .all(|word| word == secret.as_str())
    }

    fn description() -> &'static str {
        "Every non-imposter holds the drawn secret word"
    }
}
