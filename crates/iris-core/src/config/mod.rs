//! # Iris Core Configuration
//!
//! [`IrisConfig`] is read from a JSON, TOML or YAML file (chosen by
//! extension, see [`ConfigFormat`]). It carries the log level, reader plugin
//! settings (`plugins.call_order`, `plugins.disabled`) and viewer defaults.
pub mod error;
pub mod settings;

pub use error::ConfigError;
pub use settings::{ConfigFormat, IrisConfig, PluginSettings, ViewerSettings};
