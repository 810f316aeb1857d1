//! Narration events and the sinks that receive them.
//!
//! The engine hands every narrated line to a `NarrationSink`. It does not care
//! whether the line is printed, written to a log, both, or dropped. Each line
//! carries a `NarrationKind` so a sink can color or filter it without parsing
//! the text.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NarrationKind {
    RoundStart,
    Passive,
    PassiveAttack,
    AttackSuccess,
    AttackFail,
    PassiveDeath,
    SuddenDeath,
    Winner,
    MostKills,
    /// "Nothing happened" fallback.
    Quiet,
    RoundEnd,
    Stopped,
    /// Lines narrated by extensions.
    Custom,
}

impl NarrationKind {
    /// Framing lines around a round. They do not count as round activity.
    #[must_use]
    pub fn is_framing(self) -> bool {
        matches!(self, NarrationKind::RoundStart | NarrationKind::RoundEnd)
    }
}

/// One narrated line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narration {
    pub kind: NarrationKind,
    pub text: String,
}

impl Narration {
    pub fn new(kind: NarrationKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Narration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Receiver for narrated lines.
pub trait NarrationSink {
    fn emit(&mut self, narration: &Narration);
}

impl<F> NarrationSink for F
where
    F: FnMut(&Narration),
{
    fn emit(&mut self, narration: &Narration) {
        self(narration)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NarrationSink for NullSink {
    fn emit(&mut self, _narration: &Narration) {}
}

/// Collects lines into a shared buffer.
///
/// Clones share the buffer, so keep one clone to read what the engine wrote.
///
/// ```
/// use battle_royale::narration::{MemorySink, Narration, NarrationKind, NarrationSink};
///
/// let sink = MemorySink::new();
/// let mut writer = sink.clone();
/// writer.emit(&Narration::new(NarrationKind::Passive, "Ann naps."));
/// assert_eq!(sink.texts(), vec!["Ann naps.".to_string()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    lines: Rc<RefCell<Vec<Narration>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    #[must_use]
    pub fn lines(&self) -> Vec<Narration> {
        self.lines.borrow().clone()
    }

    /// Text of everything emitted so far.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.lines.borrow().iter().map(|n| n.text.clone()).collect()
    }

    /// Lines of one kind.
    #[must_use]
    pub fn of_kind(&self, kind: NarrationKind) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.text.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl NarrationSink for MemorySink {
    fn emit(&mut self, narration: &Narration) {
        self.lines.borrow_mut().push(narration.clone());
    }
}
