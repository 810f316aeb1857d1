//! The built-in behavior pack.
//!
//! Always loaded first. Provides:
//! - the `attack`, `passive` and `passive-death` actions
//! - sudden death: once at most a tenth of the roster is alive (and classic
//!   behavior is off), every probability becomes certain for the rest of the
//!   run
//! - the end-of-game summary: winner line and most-kills line

mod actions;
mod summary;

pub use actions::{attack, passive, passive_death};
pub use summary::join_names;

use crate::actions::Action;
use crate::core::{ExtensionError, Result};
use crate::engine::Simulation;
use crate::extensions::Extension;
use crate::narration::NarrationKind;

/// Extension name of the built-in pack.
pub const BUILTIN_NAME: &str = "builtin";

const SUDDEN_DEATH_ANNOUNCEMENT: &str = "SUDDEN DEATH - All attacks are guaranteed to succeed";

#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinPack;

impl BuiltinPack {
    /// Whether the roster has shrunk enough for sudden death.
    #[must_use]
    pub fn sudden_death_due(sim: &Simulation) -> bool {
        !sim.config().classic_behavior && sim.living_count() * 10 <= sim.initial_size()
    }
}

impl Extension for BuiltinPack {
    fn name(&self) -> &str {
        BUILTIN_NAME
    }

    fn setup(&mut self, sim: &mut Simulation) -> std::result::Result<(), ExtensionError> {
        let actions = [
            Action::new("attack", "Participant attacks another participant", attack),
            Action::new("passive", "Participant does nothing", passive),
            Action::new("passive-death", "Participant dies", passive_death),
        ];
        for action in actions {
            sim.add_action(action)
                .map_err(|e| ExtensionError::setup(BUILTIN_NAME, e))?;
        }
        Ok(())
    }

    fn pre_round(&mut self, sim: &mut Simulation) -> Result<()> {
        if Self::sudden_death_due(sim) && sim.trigger_sudden_death() {
            sim.narrate(NarrationKind::SuddenDeath, SUDDEN_DEATH_ANNOUNCEMENT);
        }
        Ok(())
    }

    fn post_game(&mut self, sim: &mut Simulation) -> Result<()> {
        summary::announce_winner(sim)?;
        summary::announce_most_kills(sim)
    }
}
