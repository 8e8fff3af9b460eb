//! Logging initialization
//!
//! The engine logs through the `log` facade; binaries pick the backend.
//! These helpers set up `env_logger` with an info-level default that can
//! be overridden through `RUST_LOG`.

use env_logger::Env;

/// Initialize the logging system
///
/// # Panics
/// Panics if a global logger has already been installed. Use
/// [`try_init`] from tests or library code that may race another logger.
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// Initialize the logging system, ignoring an already-installed logger
pub fn try_init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
