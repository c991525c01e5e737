//! Shared configuration types for xvisbell.
//!
//! Everything here is built once from the command line and never mutated
//! afterwards; the platform layer and the scheduler receive these values
//! explicitly.

pub mod geometry;

use std::time::Duration;

pub use geometry::{GeometryArg, GeometryError, GeometrySpec, OverlayRect};

/// Default interval between flashes in fixed-count mode, in milliseconds.
pub const DEFAULT_FLASH_INTERVAL_MS: u16 = 100;

/// What the overlay should look like and where it goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayRequest {
    pub geometry: GeometrySpec,
    /// Named X11 color; `None` uses the screen's white pixel
    pub color: Option<String>,
}

impl OverlayRequest {
    pub fn new(geometry: GeometrySpec, color: Option<String>) -> Self {
        Self { geometry, color }
    }

    /// Resolve automatic extents against the output size.
    pub fn resolve(&self, output_width: u32, output_height: u32) -> OverlayRect {
        self.geometry.resolve(output_width, output_height)
    }
}

/// Parameters for the fixed-count flash mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashSettings {
    pub count: u16,
    /// Gap between one hide and the next show
    pub interval: Duration,
}

impl FlashSettings {
    pub fn new(count: u16, interval_ms: u16) -> Self {
        Self {
            count,
            interval: Duration::from_millis(u64::from(interval_ms)),
        }
    }
}

impl Default for FlashSettings {
    fn default() -> Self {
        Self::new(1, DEFAULT_FLASH_INTERVAL_MS)
    }
}
