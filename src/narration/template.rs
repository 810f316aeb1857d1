//! Placeholder substitution for message templates.
//!
//! Templates reference named slots with `{name}` tokens: `{player}`,
//! `{target}`, `{amount}`, and the positional `{player1}`..`{player4}` used by
//! passive messages. Tokens with no matching slot are copied through as
//! literal text.

/// Highest positional slot a passive message may reference.
pub const MAX_PLAYER_SLOTS: usize = 4;

const PLAYER_SLOTS: [&str; MAX_PLAYER_SLOTS] = ["player1", "player2", "player3", "player4"];

/// Name of positional slot `n` (1-based). `None` outside `1..=4`.
#[must_use]
pub fn player_slot(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| PLAYER_SLOTS.get(i)).copied()
}

/// Replace every `{name}` token that has a slot.
///
/// ```
/// use battle_royale::narration::fill;
///
/// let line = fill("{player} hits {target} for {damage}", &[("player", "Ann"), ("target", "Bob")]);
/// assert_eq!(line, "Ann hits Bob for {damage}");
/// ```
#[must_use]
pub fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find(['{', '}']) {
            Some(close) if after.as_bytes()[close] == b'}' => {
                let name = &after[..close];
                match slots.iter().find(|(slot, _)| *slot == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            // Stray brace: keep it and rescan from the next character.
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Highest `{playerN}` slot referenced by a template, 0 if none.
#[must_use]
pub fn highest_player_slot(template: &str) -> usize {
    (1..=MAX_PLAYER_SLOTS)
        .rev()
        .find(|&n| {
            player_slot(n).is_some_and(|slot| template.contains(&format!("{{{slot}}}")))
        })
        .unwrap_or(0)
}
