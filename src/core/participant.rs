//! Participant identification and per-participant state.
//!
//! ## ParticipantId
//!
//! Type-safe index into the roster. Ids are assigned in roster order at setup
//! and never reused: eliminated participants stay in the roster as dead
//! records so end-of-game statistics can see them.
//!
//! ## Roster
//!
//! Vec-backed participant storage with O(1) access by `ParticipantId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::ext_data::ExtensionData;
use super::group::GroupId;

/// Participant category used when none is configured.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Participant identifier (0-based roster index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(pub u32);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// A single contestant.
///
/// The name is fixed at construction. Liveness and the kill counter are
/// mutated by actions; `ext` belongs to extensions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,

    /// Group this participant belongs to (team mode only).
    /// The group's member list is authoritative.
    pub group: Option<GroupId>,

    /// Behavior category; selects message flavor.
    pub category: String,

    alive: bool,
    kills: u32,

    /// Free-form data slots for extensions.
    pub ext: ExtensionData,
}

impl Participant {
    /// Create a living participant with no kills.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            group: None,
            category: DEFAULT_CATEGORY.to_string(),
            alive: true,
            kills: 0,
            ext: ExtensionData::default(),
        }
    }

    /// Set the behavior category (builder pattern).
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the group (builder pattern).
    #[must_use]
    pub fn with_group(mut self, group: GroupId) -> Self {
        self.group = Some(group);
        self
    }

    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Mark this participant dead. Returns `false` if already dead.
    pub fn kill(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }

    /// Credit one kill.
    pub fn record_kill(&mut self) {
        self.kills += 1;
    }

    /// Check whether two participants are on the same team.
    ///
    /// Participants without a group are never teammates.
    #[must_use]
    pub fn is_teammate_of(&self, other: &Participant) -> bool {
        matches!((self.group, other.group), (Some(a), Some(b)) if a == b)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Ordered participant storage with O(1) access.
///
/// ## Example
///
/// ```
/// use battle_royale::core::Roster;
///
/// let mut roster = Roster::new();
/// let ann = roster.push_new("Ann");
/// let bob = roster.push_new("Bob");
///
/// roster[bob].kill();
/// assert!(roster[ann].is_alive());
/// assert_eq!(roster.living().collect::<Vec<_>>(), vec![ann]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new default-category participant, returning its id.
    pub fn push_new(&mut self, name: impl Into<String>) -> ParticipantId {
        let id = ParticipantId::new(self.participants.len() as u32);
        self.participants.push(Participant::new(id, name));
        id
    }

    /// Total participants, living or dead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.get_mut(id.index())
    }

    /// Look up a participant by exact name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Iterate in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Iterate all ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> {
        (0..self.participants.len() as u32).map(ParticipantId)
    }

    /// Ids of living participants in roster order.
    pub fn living(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.iter().filter(|p| p.alive).map(|p| p.id)
    }

    /// Sum of every participant's kill counter.
    #[must_use]
    pub fn total_kills(&self) -> u32 {
        self.participants.iter().map(|p| p.kills).sum()
    }
}

impl Index<ParticipantId> for Roster {
    type Output = Participant;

    fn index(&self, id: ParticipantId) -> &Self::Output {
        &self.participants[id.index()]
    }
}

impl IndexMut<ParticipantId> for Roster {
    fn index_mut(&mut self, id: ParticipantId) -> &mut Self::Output {
        &mut self.participants[id.index()]
    }
}
