//! Teams for group play.
//!
//! A group owns the ordered list of its members; participants only carry a
//! `GroupId` back-reference. Group liveness is derived: a group is alive while
//! any member is alive.

use serde::{Deserialize, Serialize};

use super::ext_data::ExtensionData;
use super::participant::{ParticipantId, Roster};

/// Group identifier (0-based index in creation order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u16);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// A named team. Membership is fixed for the run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    members: Vec<ParticipantId>,

    /// Free-form data slots for extensions.
    pub ext: ExtensionData,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
            ext: ExtensionData::default(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in join order.
    #[must_use]
    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub(crate) fn add_member(&mut self, member: ParticipantId) {
        if !self.members.contains(&member) {
            self.members.push(member);
        }
    }

    /// A group is alive while any member is alive.
    #[must_use]
    pub fn is_alive(&self, roster: &Roster) -> bool {
        self.members
            .iter()
            .any(|&m| roster.get(m).is_some_and(|p| p.is_alive()))
    }

    /// Living members in join order.
    pub fn living_members<'a>(&'a self, roster: &'a Roster) -> impl Iterator<Item = ParticipantId> + 'a {
        self.members
            .iter()
            .copied()
            .filter(move |&m| roster.get(m).is_some_and(|p| p.is_alive()))
    }

    /// Combined kill count of every member, living or dead.
    #[must_use]
    pub fn total_kills(&self, roster: &Roster) -> u32 {
        self.members
            .iter()
            .filter_map(|&m| roster.get(m))
            .map(|p| p.kills())
            .sum()
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
