use crate::constants::TRUTHY_ANSWERS;

/// Interprets a typed answer as a yes/no decision.
///
/// Only the literal strings in [`TRUTHY_ANSWERS`] count as yes. There is no
/// trimming or case folding, so `"YES"` and `"yes "` are both no.
pub fn parse_bool(answer: &str) -> bool {
    TRUTHY_ANSWERS.contains(&answer)
}
