//! X11 overlay and bell notification source for xvisbell
//!
//! Provides the concrete [`Surface`](xvisbell_core::Surface) and
//! [`NotificationSource`](xvisbell_core::NotificationSource) used by the
//! binary. Both borrow one [`X11Display`], so the connection outlives them
//! and is closed once when the display is dropped.

pub mod platform;

pub use platform::{PlatformError, X11BellSource, X11Display, X11Surface, wait_readable};
