//! Simulation lifecycle types.

use serde::{Deserialize, Serialize};

/// Where a simulation is in its lifecycle.
///
/// `Initializing` only exists while the builder runs extension setup; a built
/// simulation starts in `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimPhase {
    Initializing,
    Running,
    /// One participant (or group, in team mode) remains.
    Finished,
    /// Cancelled through a `StopHandle`.
    Stopped,
}

impl SimPhase {
    /// `Finished` or `Stopped`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SimPhase::Finished | SimPhase::Stopped)
    }
}

/// What one call to `advance_round` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The round completed and more than one side remains.
    Continuing,
    /// The round ended the game; post-game hooks have run.
    Finished,
    /// A stop was requested before or during the round.
    Stopped,
    /// The simulation was already terminal; nothing happened.
    AlreadyOver,
}

/// Summary of a completed round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (starts at 1).
    pub round: u32,

    /// Names eliminated this round, in elimination order.
    pub eliminated: Vec<String>,

    /// Living participants after the round.
    pub living_after: usize,
}
