use log::{info, warn};

/// Thin facade over the `log` crate so engine internals stay free of
/// direct macro calls.
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    /// Conditions worth surfacing but recovered from, like degenerate
    /// attitude input.
    pub fn flag(&self, message: &str) {
        warn!("{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
