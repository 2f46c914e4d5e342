//! Log subscriber setup for the binary
//!
//! Library code only emits `tracing` events; the binary installs one
//! fmt subscriber on stderr. `RUST_LOG` takes precedence over verbosity.

use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Default filter directive for a verbosity level
pub fn directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
        Verbosity::Debug => "trace",
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbosity >= Verbosity::Debug)
        .without_time()
        .try_init();
}
