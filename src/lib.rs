//! # battle-royale
//!
//! A round-based elimination contest simulator.
//!
//! Every round, each living participant performs one action drawn uniformly
//! from a registry, with probabilistic outcomes narrated from message
//! templates, until one participant (or one team) remains.
//!
//! ## Design Principles
//!
//! 1. **Actions Are Data**: The engine knows nothing about attacking or dying.
//!    Behaviors are named entries in an `ActionRegistry`, and the built-in
//!    ones are registered exactly like anyone else's.
//!
//! 2. **Extensions Over Edits**: Behavior packs implement the `Extension`
//!    hook set to add actions, tune probabilities, or react to rounds and the
//!    end of the game, without touching the engine.
//!
//! 3. **Deterministic When Seeded**: All randomness flows through one
//!    `ChaCha8Rng`, so a seed reproduces a whole game.
//!
//! ## Modules
//!
//! - `core`: Participants, groups, extension data, RNG, configuration, errors
//! - `narration`: Message bank, template filling, narration sinks
//! - `actions`: Action type and registry
//! - `extensions`: Extension hook set and catalog
//! - `builtin`: The built-in pack (attack, passive, passive death, sudden
//!   death, end-of-game summary)
//! - `packs`: Optional packs enabled through an extensions directory
//! - `engine`: Simulation, builder, round loop
//! - `loader`: JSON config files

pub mod core;
pub mod narration;
pub mod actions;
pub mod extensions;
pub mod builtin;
pub mod packs;
pub mod engine;
pub mod loader;

// Re-export commonly used types
pub use crate::core::{
    ParticipantId, Participant, Roster,
    GroupId, Group,
    ExtValue, ExtensionData,
    GameRng,
    Probabilities, ParticipantSpec, SimConfig,
    ActionError, ConfigError, ExtensionError, SimError,
};

pub use crate::narration::{MessageBank, Narration, NarrationKind, NarrationSink, MemorySink, NullSink};

pub use crate::actions::{Action, ActionRegistry};

pub use crate::extensions::{Extension, ExtensionCatalog, ExtensionFactory};

pub use crate::builtin::BuiltinPack;

pub use crate::engine::{RoundOutcome, RoundRecord, SimPhase, Simulation, SimulationBuilder, StopHandle};

pub use crate::loader::{load_config, LoadedConfig};
