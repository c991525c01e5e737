//! Platform layer for the visual bell overlay
//!
//! Only X11 is supported: bell notifications come from the XKEYBOARD
//! extension, which has no Wayland equivalent.

mod poll;
mod x11;
mod xkb;

use thiserror::Error;
use x11rb::errors::{ConnectError, ConnectionError, ReplyError, ReplyOrIdError};
use xvisbell_core::BellError;
use xvisbell_types::OverlayRect;

pub use poll::wait_readable;
pub use x11::{X11Display, X11Surface};
pub use xkb::{X11BellSource, XKB_MAJOR_VERSION, XKB_MINOR_VERSION};

/// Errors from talking to the display server.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("cannot open X display: {0}")]
    Connect(#[from] ConnectError),

    #[error("X connection failed: {0}")]
    Connection(#[from] ConnectionError),

    #[error("X request failed: {0}")]
    Reply(#[from] ReplyError),

    #[error("X resource allocation failed: {0}")]
    ReplyOrId(#[from] ReplyOrIdError),

    #[error("X server does not support the XKEYBOARD extension")]
    MissingXkb,

    #[error(
        "XKEYBOARD {required_major}.{required_minor} not supported (server has {server_major}.{server_minor})"
    )]
    UnsupportedXkb {
        required_major: u16,
        required_minor: u16,
        server_major: u16,
        server_minor: u16,
    },

    #[error("overlay geometry {0} exceeds X11 window limits")]
    GeometryOutOfRange(OverlayRect),

    #[error("poll on X connection failed: {0}")]
    Poll(#[from] rustix::io::Errno),
}

pub(crate) fn surface_error(err: impl Into<PlatformError>) -> BellError {
    BellError::Surface(Box::new(err.into()))
}

pub(crate) fn source_error(err: impl Into<PlatformError>) -> BellError {
    BellError::Source(Box::new(err.into()))
}

pub(crate) fn wait_error(err: impl Into<PlatformError>) -> BellError {
    BellError::Wait(Box::new(err.into()))
}
