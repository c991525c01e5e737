//! X11 connection and overlay window
//!
//! The overlay is a plain `InputOutput` window with `override_redirect` set,
//! so the window manager never decorates or repositions it, and `save_under`
//! so unmapping it is cheap for the server. Flashing is just map/unmap.

use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::{
    ConfigureWindowAux, ConnectionExt as _, CreateWindowAux, Screen, StackMode, Window,
    WindowClass,
};
use x11rb::rust_connection::RustConnection;
use xvisbell_core::{BellError, Surface};
use xvisbell_types::{OverlayRect, OverlayRequest};

use super::{PlatformError, surface_error};

/// An open connection to the X server plus the screen we draw on.
pub struct X11Display {
    conn: RustConnection,
    screen_num: usize,
}

impl X11Display {
    /// Connect to the display named by `$DISPLAY`.
    pub fn connect() -> Result<Self, PlatformError> {
        let (conn, screen_num) = x11rb::connect(None)?;
        tracing::debug!(screen = screen_num, "Connected to X server");
        Ok(Self { conn, screen_num })
    }

    pub fn conn(&self) -> &RustConnection {
        &self.conn
    }

    pub fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    /// Size of the root window, used for automatic overlay extents.
    pub fn output_size(&self) -> (u32, u32) {
        let screen = self.screen();
        (
            u32::from(screen.width_in_pixels),
            u32::from(screen.height_in_pixels),
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Window
// ─────────────────────────────────────────────────────────────────────────────

/// The flash window. Created unmapped.
pub struct X11Surface<'a> {
    conn: &'a RustConnection,
    window: Window,
}

impl<'a> X11Surface<'a> {
    pub fn create(display: &'a X11Display, request: &OverlayRequest) -> Result<Self, PlatformError> {
        let conn = display.conn();
        let screen = display.screen();

        let (output_width, output_height) = display.output_size();
        let rect = request.resolve(output_width, output_height);
        let (x, y, width, height) = window_bounds(rect)?;

        let background = background_pixel(conn, screen, request.color.as_deref())?;

        let window = conn.generate_id()?;
        let aux = CreateWindowAux::new()
            .background_pixel(background)
            .override_redirect(1)
            .save_under(1);

        conn.create_window(
            screen.root_depth,
            window,
            screen.root,
            x,
            y,
            width,
            height,
            0,
            WindowClass::INPUT_OUTPUT,
            screen.root_visual,
            &aux,
        )?;
        conn.flush()?;

        tracing::info!(%rect, window, "Overlay window created");

        Ok(Self { conn, window })
    }

    fn map_raised(&self) -> Result<(), PlatformError> {
        let raise = ConfigureWindowAux::new().stack_mode(StackMode::ABOVE);
        self.conn.configure_window(self.window, &raise)?;
        self.conn.map_window(self.window)?;
        self.conn.flush()?;
        Ok(())
    }

    fn unmap(&self) -> Result<(), PlatformError> {
        self.conn.unmap_window(self.window)?;
        self.conn.flush()?;
        Ok(())
    }
}

impl Surface for X11Surface<'_> {
    fn show(&mut self) -> Result<(), BellError> {
        self.map_raised().map_err(surface_error)
    }

    fn hide(&mut self) -> Result<(), BellError> {
        self.unmap().map_err(surface_error)
    }
}

impl Drop for X11Surface<'_> {
    fn drop(&mut self) {
        // The server would reclaim the window with the connection anyway
        let _ = self.conn.destroy_window(self.window);
        let _ = self.conn.flush();
    }
}

/// Convert a resolved rectangle into X11's 16-bit window coordinates.
pub(crate) fn window_bounds(rect: OverlayRect) -> Result<(i16, i16, u16, u16), PlatformError> {
    let out_of_range = |_| PlatformError::GeometryOutOfRange(rect);
    Ok((
        i16::try_from(rect.x).map_err(out_of_range)?,
        i16::try_from(rect.y).map_err(out_of_range)?,
        u16::try_from(rect.width).map_err(out_of_range)?,
        u16::try_from(rect.height).map_err(out_of_range)?,
    ))
}

/// Pick the overlay fill pixel.
///
/// No color means the screen's white pixel. A name the server cannot
/// allocate falls back to black with a warning.
fn background_pixel(
    conn: &RustConnection,
    screen: &Screen,
    color: Option<&str>,
) -> Result<u32, PlatformError> {
    let Some(name) = color else {
        return Ok(screen.white_pixel);
    };

    match conn
        .alloc_named_color(screen.default_colormap, name.as_bytes())?
        .reply()
    {
        Ok(reply) => {
            tracing::debug!(color = name, pixel = reply.pixel, "Allocated overlay color");
            Ok(reply.pixel)
        }
        Err(ReplyError::X11Error(err)) => {
            tracing::warn!(color = name, error = ?err.error_kind, "Color not found; using black");
            Ok(screen.black_pixel)
        }
        Err(e) => Err(e.into()),
    }
}
