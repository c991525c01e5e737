//! xvisbell - visual bell for X11.
//!
//! Suppresses the audible XKB bell and flashes an overlay window instead.
//!
//! Usage: xvisbell [--color COLOR] [--geometry WxH+X+Y] [--flash COUNT | --once] [--time MS]

use std::process::ExitCode;

use clap::Parser;
use xvisbell::logging::init_logging;
use xvisbell::{Cli, run};

fn main() -> ExitCode {
    // Usage errors exit here with status 2, before any X connection
    let cli = Cli::parse();

    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "xvisbell failed");
            ExitCode::FAILURE
        }
    }
}
