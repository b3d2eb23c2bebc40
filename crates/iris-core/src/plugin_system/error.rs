//! # Iris Core Plugin System Errors
//!
//! Defines error types specific to the Iris plugin system.
//!
//! [`PluginSystemError`] covers registration and dispatch outcomes, including
//! the "no reader available" result of a lookup that no plugin claimed.
//! [`PluginError`] is what a plugin's reader hook returns for a genuine
//! failure while sniffing a path; it is not used for "not my format".
use std::fmt;

use serde::Serialize;

use crate::io::ReadError;
use crate::plugin_system::version::VersionError;

/// Failure raised by a plugin's reader hook
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Reader resolution error: {0}")]
    ResolutionError(String),

    #[error("I/O error while sniffing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A hook failure recorded while dispatch moved on to the next plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookCallError {
    pub plugin_id: String,
    pub message: String,
}

impl fmt::Display for HookCallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.plugin_id, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError { plugin_id: String, message: String },

    #[error("Plugin '{plugin_id}' is not compatible with API version {api_version}")]
    IncompatibleApi {
        plugin_id: String,
        api_version: String,
    },

    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Plugin is disabled: {0}")]
    PluginDisabled(String),

    #[error("No plugin found capable of reading '{path}'{hook_errors}", hook_errors = format_hook_errors(.errors))]
    NoReaderFound {
        path: String,
        errors: Vec<HookCallError>,
    },

    #[error("Plugin '{plugin_id}' does not recognize '{path}'")]
    ReaderDeclined { plugin_id: String, path: String },

    #[error("Reader hook of plugin '{plugin_id}' failed for '{path}': {source}")]
    HookFailed {
        plugin_id: String,
        path: String,
        #[source]
        source: PluginError,
    },

    #[error("Reader from plugin '{plugin_id}' failed to read '{path}': {source}")]
    ReaderFailed {
        plugin_id: String,
        path: String,
        #[source]
        source: ReadError,
    },

    #[error("Invalid plugin call order: {0}")]
    InvalidCallOrder(String),

    #[error("Version parsing error: {0}")]
    VersionParsing(#[from] VersionError),

    #[error("Internal plugin system error: {0}")]
    InternalError(String),
}

fn format_hook_errors(errors: &[HookCallError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!(" (plugin errors: {})", joined.join("; "))
}

impl PluginSystemError {
    /// Whether this is the "nobody claimed the path" outcome
    pub fn is_no_reader(&self) -> bool {
        matches!(self, PluginSystemError::NoReaderFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PluginSystemError>;
