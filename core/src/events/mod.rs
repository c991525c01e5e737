//! Bell notifications and the source that produces them
//!
//! The platform layer decodes raw display-server events into [`BellEvent`]
//! before the scheduler ever sees them. Anything that is not a bell
//! notification arrives as [`BellEvent::Other`] and is dropped by the
//! scheduler.

use std::time::Duration;

use crate::error::{BellError, WaitError};

/// A decoded event from the notification connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellEvent {
    /// The keyboard subsystem asked for an audible bell.
    BellNotify,
    /// Any other event on the same connection.
    Other,
}

pub trait NotificationSource {
    /// Block until events are readable or `timeout` elapses.
    ///
    /// `None` waits indefinitely. Signal interruption is reported as
    /// [`WaitError::Interrupted`] so the caller can retry.
    fn wait(&mut self, timeout: Option<Duration>) -> Result<(), WaitError>;

    /// Pull every event queued right now without blocking.
    ///
    /// The iterator ends once the queue is empty; the next call starts fresh.
    fn drain_events(&mut self) -> impl Iterator<Item = Result<BellEvent, BellError>> + '_;
}
