//! Structured logging for gaugetags
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-tag debug control (`--debug-<tag>` flags on the binary)
//! - Colored console output on stderr, so stdout stays clean for records
//!
//! ## Usage
//!
//! ```rust
//! use gaugetags::logger::{self, LogTag};
//!
//! logger::info(LogTag::Tags, "Built 42 descriptors");
//! logger::debug(LogTag::Paginator, "Requesting page 3"); // Only if --debug-paginator
//! logger::verbose(LogTag::Api, "Raw response: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup with the flags parsed by the binary:
//! ```rust
//! use gaugetags::logger::{self, LoggerConfig};
//!
//! logger::init(LoggerConfig::default());
//! ```
//!
//! Without `init`, the default configuration (Info and above, no debug tags)
//! is used.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, set_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Replaces the active configuration. Safe to call more than once; the last
/// call wins.
pub fn init(config: LoggerConfig) {
    set_logger_config(config);
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
///
/// Warnings are shown by default (unless quiet mode is set).
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics)
///
/// Debug logs are ONLY shown when debug mode is enabled for the tag.
///
/// # Example
/// ```rust
/// use gaugetags::logger::{self, LogTag};
///
/// // Only shown with --debug-snapshot
/// logger::debug(LogTag::Snapshot, "gauges indexed at block 118000000");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
