//! Timed reaction scheduler for daemon mode.
//!
//! The scheduler is a two-state machine driven by two wake-up sources:
//! - **Idle**: overlay hidden, no deadline; block on the notification source only
//! - **Armed(deadline)**: overlay shown; block until readable or the deadline
//!
//! Each wake cycle:
//!
//! ```text
//!   timeout = Idle ? forever : max(deadline - now, 0)
//!   wait(timeout)                    retried on signal interruption
//!   Armed && now >= deadline  ──►  hide(), Idle
//!   for each BellNotify       ──►  show(), Armed(now + window)
//! ```
//!
//! Expiry is always checked before the drain. A bell that lands on the same
//! wake as an expiring deadline therefore produces a hide followed by a fresh
//! show instead of silently extending the old flash.

mod timer;


use std::convert::Infallible;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::error::{BellError, WaitError};
use crate::events::{BellEvent, NotificationSource};
use crate::surface::Surface;

pub use timer::FlashTimer;

/// How long the overlay stays visible after the last bell.
pub const WINDOW_TIMEOUT: Duration = Duration::from_millis(100);

/// Observable scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Armed(Instant),
}

pub struct Scheduler<S, V, C> {
    source: S,
    surface: V,
    clock: C,
    timer: FlashTimer,
    window: Duration,
}

impl<S, V, C> Scheduler<S, V, C>
where
    S: NotificationSource,
    V: Surface,
    C: Clock,
{
    pub fn new(source: S, surface: V, clock: C) -> Self {
        Self {
            source,
            surface,
            clock,
            timer: FlashTimer::new(),
            window: WINDOW_TIMEOUT,
        }
    }

    /// Override how long each flash stays visible.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn state(&self) -> SchedulerState {
        match self.timer.deadline() {
            Some(deadline) => SchedulerState::Armed(deadline),
            None => SchedulerState::Idle,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    /// Run wake cycles until an unrecoverable error occurs.
    pub fn run(&mut self) -> Result<Infallible, BellError> {
        tracing::info!(window_ms = self.window.as_millis() as u64, "Visual bell running");
        loop {
            self.step()?;
        }
    }

    /// Run a single wake cycle.
    pub fn step(&mut self) -> Result<(), BellError> {
        self.wait()?;

        if self.timer.expire(self.clock.now()) {
            self.surface.hide()?;
            tracing::debug!("Flash window elapsed, overlay hidden");
        }

        let mut bells = 0usize;
        for event in self.source.drain_events() {
            match event? {
                BellEvent::BellNotify => {
                    self.surface.show()?;
                    self.timer.arm(self.clock.now(), self.window);
                    bells += 1;
                }
                BellEvent::Other => {
                    tracing::trace!("Ignoring non-bell event");
                }
            }
        }

        if bells > 0 {
            tracing::debug!(bells, "Bell received, overlay armed");
        }

        Ok(())
    }

    /// Block until readable or the deadline passes.
    ///
    /// An interrupted wait is retried against the same deadline, so the
    /// remaining time is recomputed rather than restarted.
    fn wait(&mut self) -> Result<(), BellError> {
        loop {
            let timeout = self.timer.remaining(self.clock.now());
            match self.source.wait(timeout) {
                Ok(()) => return Ok(()),
                Err(WaitError::Interrupted) => {
                    tracing::trace!("Wait interrupted by signal, retrying");
                }
                Err(WaitError::Failed(e)) => return Err(e),
            }
        }
    }
}
