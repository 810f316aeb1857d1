//! Simulation configuration.
//!
//! A `SimConfig` is the resolved, validated form of whatever the user wrote in
//! a config file. The engine keeps the original untouched; the probabilities it
//! actually rolls against live in a separate copy that sudden death may
//! escalate mid-run.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::participant::DEFAULT_CATEGORY;
use crate::narration::{highest_player_slot, MessageBank, REQUIRED_CATEGORIES};

/// Chances used by the built-in actions, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Chance that an attack action actually attacks someone.
    pub attack: f64,

    /// Chance that an attempted attack kills its target.
    pub attack_success: f64,

    /// Chance that a passive-death action kills the actor.
    pub passive_death: f64,
}

impl Probabilities {
    /// Every outcome certain.
    pub const CERTAIN: Self = Self {
        attack: 1.0,
        attack_success: 1.0,
        passive_death: 1.0,
    };

    /// Nothing ever happens.
    pub const NEVER: Self = Self {
        attack: 0.0,
        attack_success: 0.0,
        passive_death: 0.0,
    };

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("attack chance", self.attack),
            ("attack success chance", self.attack_success),
            ("passive death chance", self.passive_death),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Probabilities {
    fn default() -> Self {
        Self {
            attack: 0.5,
            attack_success: 0.5,
            passive_death: 0.05,
        }
    }
}

/// One roster entry as configured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,

    /// Message flavor; "Default" when unset.
    pub category: String,

    /// Team name (team mode only).
    pub group: Option<String>,
}

impl ParticipantSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: DEFAULT_CATEGORY.to_string(),
            group: None,
        }
    }

    /// Set the category (builder pattern). Empty strings mean "Default".
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category
        };
        self
    }

    /// Set the team (builder pattern).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub probabilities: Probabilities,

    /// Disables passive-attack narration and sudden death.
    pub classic_behavior: bool,

    /// Only narrate deaths.
    pub show_kills_only: bool,

    /// Team mode: participants in the same group never attack each other and
    /// the last living group wins.
    pub use_teams: bool,

    pub roster: Vec<ParticipantSpec>,

    /// RNG seed; drawn from the OS when unset.
    pub seed: Option<u64>,
}

impl SimConfig {
    /// Free-for-all configuration with default chances.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            probabilities: Probabilities::default(),
            classic_behavior: false,
            show_kills_only: false,
            use_teams: false,
            roster: names.into_iter().map(ParticipantSpec::new).collect(),
            seed: None,
        }
    }

    /// Empty roster; add entries with `with_participant`.
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<String>())
    }

    #[must_use]
    pub fn with_participant(mut self, spec: ParticipantSpec) -> Self {
        self.roster.push(spec);
        self
    }

    #[must_use]
    pub fn with_probabilities(mut self, probabilities: Probabilities) -> Self {
        self.probabilities = probabilities;
        self
    }

    #[must_use]
    pub fn classic(mut self, on: bool) -> Self {
        self.classic_behavior = on;
        self
    }

    #[must_use]
    pub fn kills_only(mut self, on: bool) -> Self {
        self.show_kills_only = on;
        self
    }

    #[must_use]
    pub fn teams(mut self, on: bool) -> Self {
        self.use_teams = on;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Distinct group names in first-appearance order.
    #[must_use]
    pub fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for group in self.roster.iter().filter_map(|p| p.group.as_deref()) {
            if !names.contains(&group) {
                names.push(group);
            }
        }
        names
    }

    /// Check every load-time invariant against the message bank.
    pub fn validate(&self, messages: &MessageBank) -> Result<(), ConfigError> {
        if self.roster.len() < 2 {
            return Err(ConfigError::TooFewParticipants(self.roster.len()));
        }

        let mut seen = FxHashSet::default();
        for spec in &self.roster {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateName(spec.name.clone()));
            }
        }

        self.probabilities.validate()?;

        if self.use_teams {
            if let Some(loner) = self.roster.iter().find(|p| p.group.is_none()) {
                return Err(ConfigError::MissingGroup(loner.name.clone()));
            }
            let groups = self.group_names().len();
            if groups < 2 {
                return Err(ConfigError::TooFewGroups(groups));
            }
        }

        for &category in REQUIRED_CATEGORIES {
            if !messages.has_category(category) {
                return Err(ConfigError::MissingCategory(category.to_string()));
            }
            if messages.defaults(category).is_empty() {
                return Err(ConfigError::NoDefaultMessages(category.to_string()));
            }
        }

        // The passive action can always fall back to a message about the actor alone.
        if !messages
            .defaults("passive")
            .iter()
            .any(|m| highest_player_slot(m) <= 1)
        {
            return Err(ConfigError::NoSoloPassiveMessage);
        }

        Ok(())
    }
}
