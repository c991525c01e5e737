//! In-memory fakes for driving the scheduler and flash mode deterministically.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::clock::Clock;
use crate::error::{BellError, WaitError};
use crate::events::{BellEvent, NotificationSource};
use crate::surface::Surface;

/// Clock that only moves when told to.
pub struct ManualClock {
    start: Instant,
    now: Cell<Instant>,
    sleeps: RefCell<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        let start = Instant::now();
        Self {
            start,
            now: Cell::new(start),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Milliseconds since the clock was created.
    pub fn elapsed_ms(&self) -> u64 {
        (self.now.get() - self.start).as_millis() as u64
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceOp {
    Show,
    Hide,
}

/// Surface that records every call with the clock time it happened at.
pub struct RecordingSurface<'a> {
    clock: &'a ManualClock,
    pub ops: Vec<(SurfaceOp, u64)>,
    pub visible: bool,
}

impl<'a> RecordingSurface<'a> {
    pub fn new(clock: &'a ManualClock) -> Self {
        Self {
            clock,
            ops: Vec::new(),
            visible: false,
        }
    }

    pub fn ops_only(&self) -> Vec<SurfaceOp> {
        self.ops.iter().map(|(op, _)| *op).collect()
    }
}

impl Surface for RecordingSurface<'_> {
    fn show(&mut self) -> Result<(), BellError> {
        self.visible = true;
        self.ops.push((SurfaceOp::Show, self.clock.elapsed_ms()));
        Ok(())
    }

    fn hide(&mut self) -> Result<(), BellError> {
        self.visible = false;
        self.ops.push((SurfaceOp::Hide, self.clock.elapsed_ms()));
        Ok(())
    }
}

/// One scripted result of a `wait` call.
pub enum Wake {
    /// Clock moves by the given amount, then these events become readable.
    Events(Duration, Vec<BellEvent>),
    /// The full timeout elapses with nothing to read.
    TimedOut,
    /// Clock moves by the given amount, then the wait reports EINTR.
    Interrupted(Duration),
}

/// Notification source that replays a script of wakes.
///
/// Once the script is exhausted `wait` fails, which ends `Scheduler::run`.
pub struct ScriptedSource<'a> {
    clock: &'a ManualClock,
    script: VecDeque<Wake>,
    pending: Vec<BellEvent>,
    /// Timeout passed to every `wait` call, in order
    pub waits: Vec<Option<Duration>>,
}

impl<'a> ScriptedSource<'a> {
    pub fn new(clock: &'a ManualClock, script: impl IntoIterator<Item = Wake>) -> Self {
        Self {
            clock,
            script: script.into_iter().collect(),
            pending: Vec::new(),
            waits: Vec::new(),
        }
    }
}

impl NotificationSource for ScriptedSource<'_> {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<(), WaitError> {
        self.waits.push(timeout);
        match self.script.pop_front() {
            Some(Wake::Events(after, events)) => {
                self.clock.advance(after);
                self.pending.extend(events);
                Ok(())
            }
            Some(Wake::TimedOut) => {
                let timeout = timeout.expect("timed out while waiting without a deadline");
                self.clock.advance(timeout);
                Ok(())
            }
            Some(Wake::Interrupted(after)) => {
                self.clock.advance(after);
                Err(WaitError::Interrupted)
            }
            None => Err(WaitError::Failed(BellError::Wait("script exhausted".into()))),
        }
    }

    fn drain_events(&mut self) -> impl Iterator<Item = Result<BellEvent, BellError>> + '_ {
        self.pending.drain(..).map(Ok)
    }
}
