//! Visual bell core: the timed reaction scheduler and fixed-count flash mode.
//!
//! Nothing in this crate talks to a display server. The platform layer
//! provides a [`Surface`] to flash and a [`NotificationSource`] of decoded
//! bell events; the scheduler decides when to show and hide.

pub mod clock;
pub mod error;
pub mod events;
pub mod flash;
pub mod scheduler;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use clock::{Clock, SystemClock};
pub use error::{BellError, BoxError, WaitError};
pub use events::{BellEvent, NotificationSource};
pub use flash::{flash_times, flash_times_with};
pub use scheduler::{FlashTimer, Scheduler, SchedulerState, WINDOW_TIMEOUT};
pub use surface::Surface;
