/// Configuration utilities - loading and parsing helpers
use super::schemas::Config;
use crate::errors::{TagError, TagResult};
use crate::logger::{self, LogTag};
use std::path::Path;

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from a specific file path
///
/// If the file doesn't exist, defaults from the schema definitions are used.
/// The result is validated before it is returned.
pub fn load_config_from_path(path: &Path) -> TagResult<Config> {
    let config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            TagError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        logger::debug(
            LogTag::Config,
            &format!("Loaded config from {}", path.display()),
        );
        parse_config(&contents).map_err(|e| match e {
            TagError::Config(reason) => {
                TagError::Config(format!("{} ({})", reason, path.display()))
            }
            other => other,
        })?
    } else {
        logger::warning(
            LogTag::Config,
            &format!(
                "Config file '{}' not found, using default values",
                path.display()
            ),
        );
        Config::default()
    };

    config.validate()?;
    Ok(config)
}

/// Parse and validate a TOML document
pub fn parse_config(contents: &str) -> TagResult<Config> {
    let config = toml::from_str::<Config>(contents)
        .map_err(|e| TagError::Config(format!("Failed to parse config: {}", e)))?;
    config.validate()?;
    Ok(config)
}
