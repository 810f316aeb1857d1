//! Bounty pack: calls out participants on a killing streak.
//!
//! After every round, each living participant whose kill count has reached
//! the threshold gets a bounty announced, once. At the end of the game the
//! pack reports whether a bounty holder survived.

use crate::core::{ExtensionError, Result};
use crate::engine::Simulation;
use crate::extensions::Extension;
use crate::narration::NarrationKind;

/// Catalog name of the pack.
pub const BOUNTY_NAME: &str = "bounty";

/// Kills needed before a bounty is placed.
pub const DEFAULT_THRESHOLD: u32 = 3;

const PLACED_KEY: &str = "bounty.placed";

#[derive(Clone, Copy, Debug)]
pub struct BountyPack {
    threshold: u32,
}

impl BountyPack {
    #[must_use]
    pub fn new(threshold: u32) -> Self {
        Self { threshold: threshold.max(1) }
    }

    #[must_use]
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    fn place_bounties(&self, sim: &mut Simulation) -> Result<()> {
        let due: Vec<_> = sim
            .participants()
            .iter()
            .filter(|p| p.is_alive() && p.kills() >= self.threshold)
            .filter(|p| !p.ext.contains(PLACED_KEY))
            .map(|p| p.id())
            .collect();

        for id in due {
            let participant = sim.participant_mut(id)?;
            participant.ext.set(PLACED_KEY, true);
            let line = format!(
                "A bounty has been placed on {} ({} kills).",
                participant.name(),
                participant.kills()
            );
            sim.narrate(NarrationKind::Custom, line);
        }
        Ok(())
    }
}

impl Default for BountyPack {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl Extension for BountyPack {
    fn name(&self) -> &str {
        BOUNTY_NAME
    }

    fn setup(&mut self, sim: &mut Simulation) -> std::result::Result<(), ExtensionError> {
        if sim.initial_size() <= self.threshold as usize {
            return Err(ExtensionError::setup(
                BOUNTY_NAME,
                format!("a roster of {} can never reach {} kills", sim.initial_size(), self.threshold),
            ));
        }
        Ok(())
    }

    fn post_round(&mut self, sim: &mut Simulation) -> Result<()> {
        self.place_bounties(sim)
    }

    fn post_game(&mut self, sim: &mut Simulation) -> Result<()> {
        // The deciding round skips post_round.
        self.place_bounties(sim)?;

        let survivor = sim
            .participants()
            .iter()
            .find(|p| p.is_alive() && p.ext.contains(PLACED_KEY))
            .map(|p| p.name().to_string());
        if let Some(name) = survivor {
            sim.narrate(NarrationKind::Custom, format!("Nobody collected the bounty on {name}."));
        }
        Ok(())
    }
}
