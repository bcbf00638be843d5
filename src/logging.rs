//! Diagnostic logging
//!
//! User-facing progress goes through [`crate::ui`]. This is the `tracing`
//! stream on stderr for debugging a run.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "INSTALL_CLAUDE_LOG";

/// Filter used when [`LOG_ENV`] is unset
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "install_claude=debug" } else { "warn" }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
