//! Auto-advance deadline
//!
//! At most one advance is pending per carousel. Scheduling replaces the
//! previous deadline and bumps a generation counter; cancelling is idempotent.

use std::time::{Duration, Instant};

/// A scheduled advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAdvance {
    /// When the advance should fire
    pub due: Instant,
    /// Monotonic schedule counter; a newer schedule always has a larger value
    pub generation: u64,
}

/// Single-slot timer for the auto-advance
#[derive(Debug, Default)]
pub struct AutoAdvanceTimer {
    pending: Option<PendingAdvance>,
    generation: u64,
}

impl AutoAdvanceTimer {
    /// Create a timer with nothing scheduled
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an advance `delay` after `now`, discarding any pending one
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> PendingAdvance {
        self.generation += 1;
        let pending = PendingAdvance {
            due: now + delay,
            generation: self.generation,
        };
        self.pending = Some(pending);
        pending
    }

    /// Clear the pending advance. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// The pending advance, if any
    pub fn pending(&self) -> Option<PendingAdvance> {
        self.pending
    }

    /// Deadline of the pending advance, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Take the pending advance if its deadline has passed
    pub fn fire_if_due(&mut self, now: Instant) -> Option<PendingAdvance> {
        match self.pending {
            Some(pending) if pending.due <= now => self.pending.take(),
            _ => None,
        }
    }
}
