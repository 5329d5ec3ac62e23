#![deny(missing_docs)]
//! Shared logging utilities for the jobscan workspace.
//!
//! This crate provides the `scan_*` logging macros used across the codebase,
//! a per-thread "current check" marker that log lines can carry, and a
//! minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Id of the keyword check currently being processed on this thread.
    static CURRENT_CHECK: Cell<u64> = const { Cell::new(0) };
}

/// Records the id of the check the current thread is working on.
/// The controller calls this when it starts a check.
pub fn set_current_check(check_id: u64) {
    CURRENT_CHECK.with(|v| v.set(check_id));
}

/// Retrieves the id of the check recorded for the current thread.
/// Returns 0 if no check has been started yet.
pub fn current_check() -> u64 {
    CURRENT_CHECK.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! scan_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! scan_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! scan_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! scan_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! scan_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

