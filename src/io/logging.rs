//! Structured logging setup for the command-line front end
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary. `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const fn default_filter(quiet: bool) -> &'static str {
    if quiet { "warn" } else { "info" }
}

/// Build the event filter, preferring `RUST_LOG` over `fallback`
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a stderr subscriber for the whole process
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(fallback: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
