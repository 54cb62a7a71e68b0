/// Configuration system for gaugetags
///
/// - `macros`: `config_struct!` for single-declaration structs with defaults
/// - `schemas`: all configuration structures
/// - `utils`: loading and validation helpers
///
/// Configuration is loaded once and passed by value into the services that
/// need it; there is no process-wide mutable config.
pub mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::*;
pub use utils::{load_config_from_path, parse_config, CONFIG_FILE_PATH};
