//! XKEYBOARD bell notifications
//!
//! Setup selects `BellNotify` on the core keyboard and turns the audible bell
//! off. The `AudibleBell` control is registered for per-client auto-reset, so
//! the server turns the audible bell back on when this client disconnects,
//! however it exits.

use std::collections::VecDeque;
use std::os::fd::{AsFd, BorrowedFd};
use std::time::Duration;

use x11rb::connection::{Connection, RequestConnection};
use x11rb::protocol::Event;
use x11rb::protocol::xkb::{self, ConnectionExt as _};
use x11rb::protocol::xproto::ModMask;
use x11rb::rust_connection::RustConnection;
use xvisbell_core::{BellError, BellEvent, NotificationSource, WaitError};

use super::x11::X11Display;
use super::{PlatformError, source_error, wait_error, wait_readable};

pub const XKB_MAJOR_VERSION: u16 = 1;
pub const XKB_MINOR_VERSION: u16 = 0;

/// The only boolean control touched: cleared now, auto-reset on disconnect.
const BELL_CONTROLS: xkb::BoolCtrl = xkb::BoolCtrl::AUDIBLE_BELL_MASK;
/// `SetControls` change mask: only the enabled-controls set is written.
const BELL_CONTROL_CHANGES: xkb::Control = xkb::Control::CONTROLS_ENABLED;

/// Bell notifications read from the X connection.
pub struct X11BellSource<'a> {
    conn: &'a RustConnection,
    /// Events x11rb had already read off the socket before a wait
    queued: VecDeque<Event>,
}

impl<'a> X11BellSource<'a> {
    /// Negotiate XKB, subscribe to bell notifications and silence the
    /// audible bell.
    pub fn setup(display: &'a X11Display) -> Result<Self, PlatformError> {
        let conn = display.conn();

        if conn
            .extension_information(xkb::X11_EXTENSION_NAME)?
            .is_none()
        {
            return Err(PlatformError::MissingXkb);
        }

        let version = conn
            .xkb_use_extension(XKB_MAJOR_VERSION, XKB_MINOR_VERSION)?
            .reply()?;
        if !version.supported {
            return Err(PlatformError::UnsupportedXkb {
                required_major: XKB_MAJOR_VERSION,
                required_minor: XKB_MINOR_VERSION,
                server_major: version.server_major,
                server_minor: version.server_minor,
            });
        }
        tracing::debug!(
            server_major = version.server_major,
            server_minor = version.server_minor,
            "XKEYBOARD extension ready"
        );

        let core_kbd: xkb::DeviceSpec = xkb::ID::USE_CORE_KBD.into();

        conn.xkb_select_events(
            core_kbd,
            xkb::EventType::from(0u16),
            xkb::EventType::BELL_NOTIFY,
            xkb::MapPart::from(0u16),
            xkb::MapPart::from(0u16),
            &xkb::SelectEventsAux::new(),
        )?;

        conn.xkb_per_client_flags(
            core_kbd,
            xkb::PerClientFlag::AUTO_RESET_CONTROLS,
            xkb::PerClientFlag::AUTO_RESET_CONTROLS,
            BELL_CONTROLS,
            BELL_CONTROLS,
            BELL_CONTROLS,
        )?
        .reply()?;

        disable_audible_bell(conn, core_kbd)?;
        conn.flush()?;

        tracing::info!("Audible bell disabled, listening for bell notifications");

        Ok(Self {
            conn,
            queued: VecDeque::new(),
        })
    }
}

/// Clear the `AudibleBell` enabled-control, leaving every other control alone.
fn disable_audible_bell(
    conn: &RustConnection,
    device: xkb::DeviceSpec,
) -> Result<(), PlatformError> {
    let no_mods = ModMask::from(0u16);
    let no_vmods = xkb::VMod::from(0u16);
    let no_ax = xkb::AXOption::from(0u16);
    let no_ctrls = xkb::BoolCtrl::from(0u32);

    conn.xkb_set_controls(
        device,
        no_mods,
        no_mods,
        no_mods,
        no_mods,
        no_vmods,
        no_vmods,
        no_vmods,
        no_vmods,
        0,
        0,
        no_ax,
        BELL_CONTROLS,
        no_ctrls,
        BELL_CONTROL_CHANGES,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        0,
        no_ctrls,
        no_ctrls,
        no_ax,
        no_ax,
        &[0; 32],
    )?;
    Ok(())
}

/// Classify a raw X event.
pub(crate) fn decode(event: &Event) -> BellEvent {
    match event {
        Event::XkbBellNotify(_) => BellEvent::BellNotify,
        Event::Error(err) => {
            tracing::debug!(error = ?err, "X11 error event");
            BellEvent::Other
        }
        _ => BellEvent::Other,
    }
}

impl AsFd for X11BellSource<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.conn.stream().as_fd()
    }
}

impl NotificationSource for X11BellSource<'_> {
    fn wait(&mut self, timeout: Option<Duration>) -> Result<(), WaitError> {
        self.conn.flush().map_err(wait_error)?;

        // Events x11rb already buffered never show up as socket readiness
        if let Some(event) = self.conn.poll_for_event().map_err(source_error)? {
            self.queued.push_back(event);
            return Ok(());
        }

        match wait_readable(&*self, timeout) {
            Ok(_) => Ok(()),
            Err(errno) if errno == rustix::io::Errno::INTR => Err(WaitError::Interrupted),
            Err(errno) => Err(wait_error(errno).into()),
        }
    }

    fn drain_events(&mut self) -> impl Iterator<Item = Result<BellEvent, BellError>> + '_ {
        let mut failed = false;
        std::iter::from_fn(move || {
            if failed {
                return None;
            }
            if let Some(event) = self.queued.pop_front() {
                return Some(Ok(decode(&event)));
            }
            match self.conn.poll_for_event() {
                Ok(Some(event)) => Some(Ok(decode(&event))),
                Ok(None) => None,
                Err(e) => {
                    failed = true;
                    Some(Err(source_error(e)))
                }
            }
        })
    }
}
