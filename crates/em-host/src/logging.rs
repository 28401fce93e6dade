//! Console logging for the run-once host binary.

use tracing_subscriber::EnvFilter;

/// Initialise logging to stderr.
///
/// Controlled by `RUST_LOG` (default: `info`). Call once, from `main` only;
/// the library crates emit events but never install a subscriber.
pub fn init_cli() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
