//! # Iris Core Kernel Errors
//!
//! [`Error`] is the top-level error of the crate. It wraps the typed errors
//! of each subsystem so callers can match on the one they care about, and
//! [`Result`] is the matching shorthand.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::plugin_system::error::PluginSystemError;
use crate::viewer::error::ViewerError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Registration, dispatch and loader failures
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    #[error("Viewer error: {0}")]
    Viewer(#[from] ViewerError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

impl Error {
    /// Whether no reader plugin claimed the path
    pub fn is_no_reader(&self) -> bool {
        matches!(self, Error::PluginSystem(e) if e.is_no_reader())
    }
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
