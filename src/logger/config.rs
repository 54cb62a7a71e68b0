/// Logger configuration and per-tag debug switches
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Most detailed level that may be printed
    pub min_level: LogLevel,
    /// Tags with debug output enabled (debug keys, see `LogTag::to_debug_key`)
    pub debug_tags: HashSet<String>,
    /// Colorize console output
    pub colored: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            colored: true,
        }
    }
}

impl LoggerConfig {
    /// Quiet configuration: errors and warnings only
    pub fn quiet() -> Self {
        Self {
            min_level: LogLevel::Warning,
            ..Self::default()
        }
    }

    /// Enable debug output for a tag (raises `min_level` to Debug if needed)
    pub fn with_debug(mut self, tag: LogTag) -> Self {
        self.debug_tags.insert(tag.to_debug_key());
        if self.min_level < LogLevel::Debug {
            self.min_level = LogLevel::Debug;
        }
        self
    }

    pub fn with_verbose(mut self) -> Self {
        self.min_level = LogLevel::Verbose;
        self
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the active logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

pub fn set_logger_config(config: LoggerConfig) {
    match LOGGER_CONFIG.write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

pub(super) fn is_debug_enabled_for_tag(config: &LoggerConfig, tag: &LogTag) -> bool {
    config.min_level == LogLevel::Verbose || config.debug_tags.contains(&tag.to_debug_key())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_debug_raises_min_level() {
        let config = LoggerConfig::default().with_debug(LogTag::Paginator);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(is_debug_enabled_for_tag(&config, &LogTag::Paginator));
        assert!(!is_debug_enabled_for_tag(&config, &LogTag::Api));
    }

    #[test]
    fn test_verbose_enables_every_tag() {
        let config = LoggerConfig::quiet().with_verbose();
        for tag in LogTag::all() {
            assert!(is_debug_enabled_for_tag(&config, tag));
        }
    }
}
