//! Cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks a running simulation to stop.
///
/// Clones share the flag, so one clone can live in a signal handler while the
/// simulation polls another. The engine checks it at the top of every round
/// and before every participant turn.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stop_requested: Arc<AtomicBool>,
}

impl StopHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop. Idempotent.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }
}
