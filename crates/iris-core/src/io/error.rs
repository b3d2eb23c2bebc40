//! # Iris Core Read Errors
//!
//! Failures reported by loader functions while reading data. Resolution-time
//! "not my format" is never an error; it is an empty result from the hook.
use thiserror::Error;

use crate::io::layer_data::DataError;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} data in '{path}': {message}")]
    InvalidFormat {
        path: String,
        format: String,
        message: String,
    },

    #[error("Shape mismatch in '{path}': expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        path: String,
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error(transparent)]
    Data(#[from] DataError),
}

impl ReadError {
    pub fn io(source: std::io::Error, path: impl Into<String>) -> Self {
        ReadError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(
        path: impl Into<String>,
        format: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ReadError::InvalidFormat {
            path: path.into(),
            format: format.into(),
            message: message.into(),
        }
    }
}
