use tracing_subscriber::filter::EnvFilter;

/// Initialize logging to stderr.
///
/// Defaults to `warn` so a normal run is silent apart from color fallback
/// warnings and fatal errors; `RUST_LOG` overrides it.
pub fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
