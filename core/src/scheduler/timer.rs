use std::time::{Duration, Instant};

/// The single pending "hide the overlay" deadline.
///
/// Arming always replaces the previous deadline, so at most one is ever
/// outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashTimer {
    deadline: Option<Instant>,
}

impl FlashTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule a hide `window` after `now`, replacing any pending one.
    pub fn arm(&mut self, now: Instant, window: Duration) -> Instant {
        let deadline = now + window;
        self.deadline = Some(deadline);
        deadline
    }

    /// Time left until the deadline, clamped to zero once it has passed.
    ///
    /// `None` when nothing is scheduled.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Clear the deadline if it is due. Returns whether it fired.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
