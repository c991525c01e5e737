//! Command-line surface.
//!
//! Usage errors (unknown flags, missing values, bad counts or geometry) are
//! reported by clap with exit code 2 before any X connection is opened.

use clap::{ArgAction, Parser, value_parser};
use xvisbell_types::{
    DEFAULT_FLASH_INTERVAL_MS, FlashSettings, GeometryArg, GeometrySpec, OverlayRequest,
};

#[derive(Debug, Parser)]
#[command(
    name = "xvisbell",
    version,
    about = "Visual bell for X11: flash the screen instead of beeping",
    after_help = "2015+ by Rian Hunter and Adam Katz, GPLv3+"
)]
pub struct Cli {
    /// Flash this color (default: white)
    #[arg(long, value_name = "COLOR")]
    pub color: Option<String>,

    /// Just flash COUNT times and exit (-1 = no flash)
    #[arg(
        long,
        value_name = "COUNT",
        allow_negative_numbers = true,
        value_parser = parse_flash_count
    )]
    pub flash: Option<i16>,

    /// Area to flash as WxH+X+Y (0 = full extent, default 0x0)
    #[arg(
        long,
        visible_alias = "geom",
        value_name = "GEOM",
        allow_hyphen_values = true,
        action = ArgAction::Append
    )]
    pub geometry: Vec<GeometryArg>,

    /// Same as --flash 1
    #[arg(long)]
    pub once: bool,

    /// Interval (in ms) between flashes for --flash
    #[arg(
        long,
        value_name = "TIME",
        allow_negative_numbers = true,
        default_value_t = DEFAULT_FLASH_INTERVAL_MS as i16,
        value_parser = value_parser!(i16).range(0..)
    )]
    pub time: i16,
}

const NO_FLASH: i16 = -1;

/// `-1` means "no fixed count", anything below that is refused.
fn parse_flash_count(value: &str) -> Result<i16, String> {
    let count: i16 = value
        .parse()
        .map_err(|e| format!("`{value}` is not a count: {e}"))?;
    if count < NO_FLASH {
        return Err(format!(
            "{count} is not a flash count (use {NO_FLASH} for none, or 0..={})",
            i16::MAX
        ));
    }
    Ok(count)
}

/// What the process does once the overlay exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// React to bell notifications until killed
    Daemon,
    /// Flash a fixed number of times, then exit
    Flash(FlashSettings),
}

impl Cli {
    /// An explicit `--flash` wins over `--once`, including `--flash -1`.
    pub fn mode(&self) -> Mode {
        match self.flash.or(self.once.then_some(1)) {
            Some(count) if count >= 0 => Mode::Flash(FlashSettings::new(
                count.unsigned_abs(),
                self.time.unsigned_abs(),
            )),
            _ => Mode::Daemon,
        }
    }

    pub fn overlay_request(&self) -> OverlayRequest {
        OverlayRequest::new(GeometrySpec::from_args(&self.geometry), self.color.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("xvisbell").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_daemon_full_screen() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.mode(), Mode::Daemon);

        let request = cli.overlay_request();
        assert_eq!(request.color, None);
        assert_eq!(request.resolve(1280, 1024).to_string(), "1280x1024+0+0");
    }

    #[test]
    fn test_flash_with_time() {
        let cli = parse(&["--flash", "3", "--time", "200"]).unwrap();
        match cli.mode() {
            Mode::Flash(settings) => {
                assert_eq!(settings.count, 3);
                assert_eq!(settings.interval, Duration::from_millis(200));
            }
            Mode::Daemon => panic!("expected flash mode"),
        }
    }

    #[test]
    fn test_once_is_flash_one() {
        let cli = parse(&["--once"]).unwrap();
        assert_eq!(cli.mode(), Mode::Flash(FlashSettings::new(1, 100)));

        let cli = parse(&["--once", "--flash", "4"]).unwrap();
        assert_eq!(cli.mode(), Mode::Flash(FlashSettings::new(4, 100)));
    }

    #[test]
    fn test_geometry_and_alias() {
        let cli = parse(&["--geometry", "100x50+10+20", "--color", "red"]).unwrap();
        let request = cli.overlay_request();
        assert_eq!(request.resolve(1920, 1080).to_string(), "100x50+10+20");
        assert_eq!(request.color.as_deref(), Some("red"));

        let cli = parse(&["--geom", "-1x-1-5-5"]).unwrap();
        assert_eq!(
            cli.overlay_request().resolve(640, 480).to_string(),
            "640x480-5-5"
        );
    }

    #[test]
    fn test_repeated_geometry_keeps_prior_offsets() {
        let cli = parse(&["--geometry", "10x10+3+4", "--geometry", "20x30"]).unwrap();
        assert_eq!(
            cli.overlay_request().resolve(0, 0).to_string(),
            "20x30+3+4"
        );
    }

    #[test]
    fn test_empty_geometry_is_full_extent() {
        let cli = parse(&["--geometry", ""]).unwrap();
        assert_eq!(
            cli.overlay_request().resolve(800, 600).to_string(),
            "800x600+0+0"
        );
    }

    #[test]
    fn test_usage_errors_exit_2() {
        for args in [
            &["--geometry", "abcx"][..],
            &["--geometry", "100x"],
            &["--flash", "many"],
            &["--flash", "40000"],
            &["--flash", "-2"],
            &["--time", "-5"],
            &["--time", "x"],
            &["--color"],
            &["--bogus"],
        ] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.exit_code(), 2, "args {args:?}");
        }
    }

    #[test]
    fn test_flash_minus_one_means_no_flash() {
        let cli = parse(&["--flash", "-1"]).unwrap();
        assert_eq!(cli.flash, Some(-1));
        assert_eq!(cli.mode(), Mode::Daemon);

        let cli = parse(&["--once", "--flash", "-1"]).unwrap();
        assert_eq!(cli.mode(), Mode::Daemon);
    }

    #[test]
    fn test_other_negative_values_are_rejected() {
        let err = parse(&["--flash", "-2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("not a flash count"));

        let err = parse(&["--flash", "-32768"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let err = parse(&["--time", "-5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_bad_geometry_is_value_validation() {
        let err = parse(&["--geometry", "100x50+1+2junk"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_help_exits_0() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);

        let err = parse(&["-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }
}
