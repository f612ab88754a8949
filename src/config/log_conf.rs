use serde::{Deserialize, Serialize};

use crate::config::env_var_any;

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub directory: String,
    pub file_level: String,
    pub error_file_level: String,
}

impl LogConfig {
    /// Reads LOG_DIR, FILE_LOG_LEVEL and ERROR_FILE_LOG_LEVEL. The console
    /// filter comes from RUST_LOG at subscriber setup.
    pub fn from_env() -> Self {
        let defaults = LogConfig::default();
        LogConfig {
            directory: env_var_any(&["LOG_DIR"]).unwrap_or(defaults.directory),
            file_level: env_var_any(&["FILE_LOG_LEVEL"]).unwrap_or(defaults.file_level),
            error_file_level: env_var_any(&["ERROR_FILE_LOG_LEVEL"]).unwrap_or(defaults.error_file_level),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            directory: "logs".to_string(),
            file_level: "debug".to_string(),
            error_file_level: "error".to_string(),
        }
    }
}
