//! Message bank: template text keyed by category and participant category.
//!
//! The JSON shape is the one message files use on disk:
//!
//! ```json
//! { "attack-success": { "Default": ["{player} defeats {target}."],
//!                       "Knight":  ["{player} runs {target} through."] } }
//! ```
//!
//! A lookup for a participant category draws from that category's entries
//! followed by the "Default" entries; unknown participant categories fall back
//! to "Default" alone.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, GameRng, DEFAULT_CATEGORY};

/// Categories every bank must provide "Default" entries for.
pub const REQUIRED_CATEGORIES: &[&str] = &[
    "passive",
    "passive-death",
    "attack-success",
    "attack-fail",
    "passive-attack",
    "winner",
    "most-kills",
];

const DEFAULT_MESSAGES: &str = include_str!("../../data/messages.json");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageBank {
    categories: FxHashMap<String, FxHashMap<String, Vec<String>>>,
}

impl MessageBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a bank from message-file JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bank shipped with the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_json_str(DEFAULT_MESSAGES)
    }

    /// A compact bank with "Default" lines for every required category.
    #[must_use]
    pub fn minimal() -> Self {
        let mut bank = Self::new();
        bank.add("passive", DEFAULT_CATEGORY, "{player1} looks around.");
        bank.add("passive", DEFAULT_CATEGORY, "{player1} shares a meal with {player2}.");
        bank.add("passive-death", DEFAULT_CATEGORY, "{player} trips and does not get up.");
        bank.add("attack-success", DEFAULT_CATEGORY, "{player} defeats {target}.");
        bank.add("attack-fail", DEFAULT_CATEGORY, "{player} attacks {target} but misses.");
        bank.add("passive-attack", DEFAULT_CATEGORY, "{player} looks for a fight.");
        bank.add("winner", DEFAULT_CATEGORY, "{player} wins with {amount} kills!");
        bank.add("most-kills", DEFAULT_CATEGORY, "{player} got the most kills ({amount}).");
        bank
    }

    /// Append a template.
    pub fn add(&mut self, category: &str, participant_category: &str, template: impl Into<String>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(participant_category.to_string())
            .or_default()
            .push(template.into());
    }

    /// Drop a whole category.
    pub fn remove_category(&mut self, category: &str) -> bool {
        self.categories.remove(category).is_some()
    }

    /// Layer `other` on top: its categories replace ours wholesale.
    pub fn merge(&mut self, other: MessageBank) {
        self.categories.extend(other.categories);
    }

    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// "Default" entries of a category (empty if missing).
    #[must_use]
    pub fn defaults(&self, category: &str) -> &[String] {
        self.entries(category, DEFAULT_CATEGORY)
    }

    /// Entries for exactly one participant category (empty if missing).
    #[must_use]
    pub fn entries(&self, category: &str, participant_category: &str) -> &[String] {
        self.categories
            .get(category)
            .and_then(|c| c.get(participant_category))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The lookup pool for a participant category.
    #[must_use]
    pub fn candidates(&self, category: &str, participant_category: &str) -> Vec<&str> {
        let defaults = self.defaults(category).iter().map(String::as_str);
        if participant_category == DEFAULT_CATEGORY {
            return defaults.collect();
        }
        self.entries(category, participant_category)
            .iter()
            .map(String::as_str)
            .chain(defaults)
            .collect()
    }

    /// Uniform pick from the lookup pool. `None` if the pool is empty.
    pub fn random_message(
        &self,
        category: &str,
        participant_category: &str,
        rng: &mut GameRng,
    ) -> Option<&str> {
        self.random_message_matching(category, participant_category, rng, |_| true)
    }

    /// Uniform pick among the pool entries `accept` allows.
    pub fn random_message_matching(
        &self,
        category: &str,
        participant_category: &str,
        rng: &mut GameRng,
        accept: impl Fn(&str) -> bool,
    ) -> Option<&str> {
        let pool: Vec<&str> = self
            .candidates(category, participant_category)
            .into_iter()
            .filter(|&template| accept(template))
            .collect();
        rng.choose(&pool).copied()
    }

    /// Category names, unordered.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }
}
