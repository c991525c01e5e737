//! Fixed-count flash mode
//!
//! A plain synchronous loop used for `--flash N` / `--once`: no event source
//! is consulted and the only suspension points are fixed sleeps.

use std::time::Duration;

use xvisbell_types::FlashSettings;

use crate::clock::Clock;
use crate::error::BellError;
use crate::scheduler::WINDOW_TIMEOUT;
use crate::surface::Surface;

/// Flash the overlay `settings.count` times, each visible for
/// [`WINDOW_TIMEOUT`], with `settings.interval` between flashes.
pub fn flash_times<V, C>(
    surface: &mut V,
    clock: &C,
    settings: &FlashSettings,
) -> Result<(), BellError>
where
    V: Surface + ?Sized,
    C: Clock + ?Sized,
{
    flash_times_with(surface, clock, settings, WINDOW_TIMEOUT)
}

/// Like [`flash_times`] with an explicit visible duration.
pub fn flash_times_with<V, C>(
    surface: &mut V,
    clock: &C,
    settings: &FlashSettings,
    visible: Duration,
) -> Result<(), BellError>
where
    V: Surface + ?Sized,
    C: Clock + ?Sized,
{
    tracing::debug!(
        count = settings.count,
        interval_ms = settings.interval.as_millis() as u64,
        "Flashing"
    );

    for remaining in (0..settings.count).rev() {
        surface.show()?;
        clock.sleep(visible);
        surface.hide()?;

        if remaining > 0 {
            clock.sleep(settings.interval);
        }
    }

    Ok(())
}
