//! Error types.
//!
//! - `ConfigError`: fatal setup problems found while loading or validating.
//! - `ActionError`: action registry mutations that were refused.
//! - `ExtensionError`: an extension failed to construct or set up. The engine
//!   logs these and keeps running without the extension.
//! - `SimError`: everything that aborts a run.

use thiserror::Error;

use super::participant::ParticipantId;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least two participants are required, got {0}")]
    TooFewParticipants(usize),

    #[error("participant name {0:?} is used more than once")]
    DuplicateName(String),

    #[error("participant names must not be empty")]
    EmptyName,

    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("team mode is on but {0:?} has no team")]
    MissingGroup(String),

    #[error("team mode needs at least two teams, got {0}")]
    TooFewGroups(usize),

    #[error("message category {0:?} is missing")]
    MissingCategory(String),

    #[error("message category {0:?} has no \"Default\" messages")]
    NoDefaultMessages(String),

    #[error("message category \"passive\" needs a \"Default\" message that mentions at most {{player1}}")]
    NoSoloPassiveMessage,

    #[error("{what}: {path}: {source}")]
    Io {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("action names must not be empty")]
    EmptyName,

    #[error("action {0:?} has no behavior")]
    MissingBehavior(String),

    #[error("action {0:?} is already registered")]
    Duplicate(String),

    #[error("action {0:?} is not registered")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("extension {name} could not be constructed: {reason}")]
    Construct { name: String, reason: String },

    #[error("extension {name} failed during setup: {reason}")]
    Setup { name: String, reason: String },
}

impl ExtensionError {
    /// Convenience for setup hooks.
    pub fn setup(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Setup {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Convenience for extension factories.
    pub fn construct(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Construct {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("built-in behavior pack failed to load: {0}")]
    BuiltinPack(ExtensionError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("no messages for category {0:?}")]
    NoMessages(String),

    #[error("no registered actions to choose from")]
    NoActions,

    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("{0}")]
    Hook(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
