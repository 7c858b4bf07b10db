//! A module which provides simple logging of algorithm progress.

#[cfg(test)]
#[path = "../../tests/unit/utils/telemetry_test.rs"]
mod telemetry_test;

use crate::utils::{InfoLogger, Timer};

/// Writes progress information into the log. Progress messages are written only in verbose mode,
/// warnings are always written. Logging does not affect algorithm behavior.
pub struct Telemetry {
    logger: InfoLogger,
    is_verbose: bool,
    time: Timer,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(logger: InfoLogger, is_verbose: bool) -> Self {
        Self { logger, is_verbose, time: Timer::start() }
    }

    /// Writes progress message when verbose mode is on.
    pub fn log(&self, message: &str) {
        if self.is_verbose {
            (self.logger)(format!("[{}ms] {message}", self.time.elapsed_millis()).as_str());
        }
    }

    /// Writes a warning message.
    pub fn warn(&self, message: &str) {
        (self.logger)(format!("[{}ms] warning: {message}", self.time.elapsed_millis()).as_str());
    }

    /// Returns true if telemetry reports progress.
    pub fn is_verbose(&self) -> bool {
        self.is_verbose
    }
}
