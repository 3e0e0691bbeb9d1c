//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
pub fn init() {
    // Ignore the error so tests that initialize twice keep working.
    let _ = env_logger::builder().is_test(false).try_init();
}
