/// Core logging implementation with automatic filtering
///
/// This module contains the central logging logic that:
/// - Checks if a log should be displayed based on level and tag
/// - Delegates to the format module for output
use super::config::{get_logger_config, is_debug_enabled_for_tag, LoggerConfig};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires debug mode for that tag
pub fn should_log(config: &LoggerConfig, tag: &LogTag, level: LogLevel) -> bool {
    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(config, tag);
    }

    true
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    let config = get_logger_config();
    if !should_log(&config, &tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message, config.colored);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_keeps_errors_and_warnings() {
        let config = LoggerConfig::quiet();
        assert!(should_log(&config, &LogTag::Tags, LogLevel::Error));
        assert!(should_log(&config, &LogTag::Api, LogLevel::Warning));
        assert!(!should_log(&config, &LogTag::Tags, LogLevel::Info));
    }

    #[test]
    fn test_debug_requires_tag_opt_in() {
        let config = LoggerConfig::default().with_debug(LogTag::Snapshot);
        assert!(should_log(&config, &LogTag::Snapshot, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Paginator, LogLevel::Debug));
        assert!(!should_log(&config, &LogTag::Snapshot, LogLevel::Verbose));
    }
}
