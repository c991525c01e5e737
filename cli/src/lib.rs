pub mod args;
pub mod logging;

use thiserror::Error;
use xvisbell_core::{BellError, Scheduler, SystemClock, flash_times};
use xvisbell_overlay::{PlatformError, X11BellSource, X11Display, X11Surface};

pub use args::{Cli, Mode};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Bell(#[from] BellError),
}

/// Connect, build the overlay and run the selected mode.
///
/// Returns only after flash mode completes or on a fatal error; daemon mode
/// never returns `Ok`. The X connection is closed when `display` drops.
pub fn run(cli: &Cli) -> Result<(), RunError> {
    let mode = cli.mode();
    let request = cli.overlay_request();
    tracing::debug!(?mode, ?request, "Starting");

    let display = X11Display::connect()?;

    match mode {
        Mode::Flash(settings) => {
            let mut surface = X11Surface::create(&display, &request)?;
            flash_times(&mut surface, &SystemClock, &settings)?;
            tracing::debug!(count = settings.count, "Flash mode finished");
            Ok(())
        }
        Mode::Daemon => {
            let source = X11BellSource::setup(&display)?;
            let surface = X11Surface::create(&display, &request)?;
            let mut scheduler = Scheduler::new(source, surface, SystemClock);
            let Err(err) = scheduler.run();
            Err(err.into())
        }
    }
}
