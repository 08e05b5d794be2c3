//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from the
//! `DIRGRAPH_LOG` environment variable when set, otherwise from the number of
//! `-v` flags.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "DIRGRAPH_LOG";

/// Filter directive for a `-v` count.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("dirgraph={}", level_for_verbosity(verbosity))))
}

/// Install the global subscriber. Safe to call more than once.
pub fn init_logging(verbosity: u8, use_color: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .with_target(false)
        .without_time()
        .try_init();
}
