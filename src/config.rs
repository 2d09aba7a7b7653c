use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_LOG_DIR, DEFAULT_MAX_INPUT_BYTES};
use crate::error::{MergeError, Result};
use crate::types::MergeFields;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fields: MergeFields,
    pub naming: NamingConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Use "Alice Smith and Bob Smith" instead of "Alice and Bob Smith".
    pub surname_per_name: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_bytes: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_LOG_DIR.to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            MergeError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&config_content)
    }

    /// Reads `household_merge.toml` from the working directory if present.
    pub fn load_or_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.input.max_bytes == 0 {
            return Err(MergeError::Config("input.max_bytes must be greater than zero".to_string()));
        }
        Ok(config)
    }
}
