//! Simulation engine.
//!
//! ## Lifecycle
//!
//! `Initializing → Running → Finished`, or `Running → Stopped` when a
//! [`StopHandle`] fires. A round is one `Running` self-transition:
//!
//! 1. "Round N - K players remaining"
//! 2. pre-round hooks
//! 3. each living participant, in roster order, performs one uniformly
//!    random registered action; the loop ends early once the game is decided
//! 4. a "nothing happened" line if nobody narrated anything
//! 5. post-round hooks, or post-game hooks if the game is decided
//! 6. "------ ROUND ENDED ------"
//!
//! ## Example
//!
//! ```
//! use battle_royale::core::{Probabilities, SimConfig};
//! use battle_royale::engine::{SimPhase, SimulationBuilder};
//! use battle_royale::narration::{MemorySink, MessageBank};
//!
//! let sink = MemorySink::new();
//! let config = SimConfig::new(["Ann", "Bob", "Cid"])
//!     .with_probabilities(Probabilities::CERTAIN)
//!     .with_seed(7);
//! let mut sim = SimulationBuilder::new(config)
//!     .messages(MessageBank::minimal())
//!     .sink(sink.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(sim.run_game().unwrap(), SimPhase::Finished);
//! assert_eq!(sim.living_count(), 1);
//! assert!(!sink.is_empty());
//! ```

mod builder;
mod simulation;
mod state;
mod stop;

pub use builder::SimulationBuilder;
pub use simulation::Simulation;
pub use state::{RoundOutcome, RoundRecord, SimPhase};
pub use stop::StopHandle;
