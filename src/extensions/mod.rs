//! Extension hook sets.
//!
//! An extension is a behavior pack that can add actions, adjust the current
//! probabilities, keep per-participant data, and react to lifecycle events.
//! Every hook has a no-op default, so a pack implements only what it needs.
//!
//! ## Lifecycle
//!
//! 1. Factories run once per simulation, built-in pack first, then in
//!    discovery order. A factory error skips that pack.
//! 2. `setup` runs for every constructed pack before round 1. A setup error
//!    drops the pack from dispatch; anything it already registered stays.
//!    Setup order is discovery order, not dependency order: look up other
//!    packs' actions in `pre_round` or later.
//! 3. Each round: `pre_round`, then the participant turns, then either
//!    `post_round` or, if the game ended during the round, `post_game`.
//!    Errors from these hooks abort the run.
//!
//! ## Example
//!
//! ```
//! use battle_royale::actions::Action;
//! use battle_royale::core::{ExtensionError, SimConfig};
//! use battle_royale::engine::{Simulation, SimulationBuilder};
//! use battle_royale::extensions::Extension;
//! use battle_royale::narration::MessageBank;
//!
//! struct Shrug;
//!
//! impl Extension for Shrug {
//!     fn name(&self) -> &str {
//!         "shrug"
//!     }
//!
//!     fn setup(&mut self, sim: &mut Simulation) -> Result<(), ExtensionError> {
//!         sim.add_action(Action::new("shrug", "Participant shrugs", |_, _| Ok(())))
//!             .map_err(|e| ExtensionError::setup("shrug", e))
//!     }
//! }
//!
//! let sim = SimulationBuilder::new(SimConfig::new(["Ann", "Bob"]).with_seed(1))
//!     .messages(MessageBank::minimal())
//!     .extension("shrug", || Ok(Box::new(Shrug) as Box<dyn Extension>))
//!     .build()
//!     .unwrap();
//! assert!(sim.actions().contains("shrug"));
//! ```

mod catalog;

pub use catalog::{ExtensionCatalog, ExtensionFactory};

use crate::core::{ExtensionError, Result};
use crate::engine::Simulation;

/// Lifecycle hooks a behavior pack may implement.
pub trait Extension {
    /// Name used in logs and `Simulation::extension_names`.
    fn name(&self) -> &str;

    /// Called once before the first round.
    fn setup(&mut self, _sim: &mut Simulation) -> std::result::Result<(), ExtensionError> {
        Ok(())
    }

    /// Called at the start of every round, before anyone acts.
    fn pre_round(&mut self, _sim: &mut Simulation) -> Result<()> {
        Ok(())
    }

    /// Called after every round that did not end the game.
    fn post_round(&mut self, _sim: &mut Simulation) -> Result<()> {
        Ok(())
    }

    /// Called once, after the round that ended the game.
    fn post_game(&mut self, _sim: &mut Simulation) -> Result<()> {
        Ok(())
    }
}
