//! Overlay show/hide primitives
//!
//! Both calls are fire-and-forget: they queue the request, flush it to the
//! display server and return without waiting for the change to be visible.

use crate::error::BellError;

pub trait Surface {
    /// Raise the overlay to the top of the stacking order and map it.
    fn show(&mut self) -> Result<(), BellError>;

    /// Unmap the overlay.
    fn hide(&mut self) -> Result<(), BellError>;
}
