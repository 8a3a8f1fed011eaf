//! # Logging Bootstrap
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages everywhere
//! - `RUST_LOG=brew=trace` - Trace for the brew crates only
//! - unset - falls back to the configured filter

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over `fallback`. Returns `false` if a global subscriber
/// was already installed.
pub fn init_tracing(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LOG_FILTER;

    #[test]
    fn test_second_init_is_harmless() {
        init_tracing(DEFAULT_LOG_FILTER);
        assert!(!init_tracing(DEFAULT_LOG_FILTER));
    }
}
