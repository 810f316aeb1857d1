//! Narration: message bank, template substitution, and output sinks.
//!
//! Text is produced in three steps: pick a template from the [`MessageBank`]
//! for a (category, participant category) pair, [`fill`] its placeholder
//! slots, and hand the result to a [`NarrationSink`] as a [`Narration`].

mod bank;
mod sink;
mod template;

pub use bank::{MessageBank, REQUIRED_CATEGORIES};
pub use sink::{MemorySink, Narration, NarrationKind, NarrationSink, NullSink};
pub use template::{fill, highest_player_slot, player_slot, MAX_PLAYER_SLOTS};
