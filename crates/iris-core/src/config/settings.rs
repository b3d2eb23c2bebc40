use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::kernel::constants;

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// Reader plugin settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Plugins asked first, in this order
    pub call_order: Vec<String>,
    /// Plugins never asked
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Treat a list of paths as one stack by default
    pub stack: bool,
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    pub plugins: PluginSettings,
    pub viewer: ViewerSettings,
}

impl IrisConfig {
    /// Parse a configuration string in the given format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        let config: IrisConfig = match format {
            ConfigFormat::Json => {
                serde_json::from_str(data).map_err(|e| ConfigError::deserialize("JSON", e))?
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::from_str(data).map_err(|e| ConfigError::deserialize("YAML", e))?
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::from_str(data).map_err(|e| ConfigError::deserialize("TOML", e))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn serialize(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| ConfigError::serialize("JSON", e))
            }
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| ConfigError::serialize("YAML", e))
            }
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::serialize("TOML", e))
            }
        }
    }

    fn format_for(path: &Path) -> Result<ConfigFormat, ConfigError> {
        ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedConfigFormat(path.display().to_string()))
    }

    /// Load a configuration file; the extension picks the format.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = Self::format_for(path)?;
        let data = fs::read_to_string(path)
            .map_err(|e| ConfigError::io(e, "read_config", path.to_path_buf()))?;
        debug!("Loaded configuration from {}", path.display());
        Self::deserialize(&data, format)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let format = Self::format_for(path)?;
        let data = self.serialize(format)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(e, "create_config_dir", parent.to_path_buf()))?;
        }
        fs::write(path, data).map_err(|e| ConfigError::io(e, "write_config", path.to_path_buf()))
    }

    /// `$HOME/.iris/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(constants::CONFIG_DIR_NAME)
                .join(constants::CONFIG_FILE_NAME)
        })
    }

    /// Load from `explicit`, else `$IRIS_CONFIG`, else the default path if it
    /// exists, else defaults. Explicitly named files must exist.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = std::env::var_os(constants::CONFIG_ENV_VAR) {
            return Self::load(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::InvalidValue {
                    key: "log_level".to_string(),
                    message: format!("'{}' is not one of {}", level, LOG_LEVELS.join(", ")),
                });
            }
        }
        Ok(())
    }

    /// Configured log level or the default
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(constants::DEFAULT_LOG_LEVEL)
    }
}
