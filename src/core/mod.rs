//! Core simulation types: participants, groups, extension data, RNG,
//! configuration, errors.
//!
//! Nothing in here knows about rounds or actions; the engine builds on top.

pub mod config;
pub mod error;
pub mod ext_data;
pub mod group;
pub mod participant;
pub mod rng;

pub use config::{ParticipantSpec, Probabilities, SimConfig};
pub use error::{ActionError, ConfigError, ExtensionError, Result, SimError};
pub use ext_data::{ExtValue, ExtensionData};
pub use group::{Group, GroupId};
pub use participant::{Participant, ParticipantId, Roster, DEFAULT_CATEGORY};
pub use rng::GameRng;
