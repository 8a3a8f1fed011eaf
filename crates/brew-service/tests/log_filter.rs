//! The global subscriber can be installed once per process, so this file
//! holds a single test.

use brew_service::init_tracing;
use tracing::Level;

#[test]
fn test_configured_filter_is_applied() {
    std::env::remove_var("RUST_LOG");

    assert!(init_tracing("warn"));

    assert!(tracing::enabled!(Level::WARN));
    assert!(tracing::enabled!(Level::ERROR));
    assert!(!tracing::enabled!(Level::INFO));
    assert!(!tracing::enabled!(Level::DEBUG));
    assert!(!tracing::enabled!(Level::TRACE));
}
