//! # The Reader Hook
//!
//! This module is the API reference for reader plugin authors.
//!
//! A *reader plugin* implements [`ReaderPlugin::get_reader`]. The host calls
//! it when a user opens a path, drops files onto the viewer, or picks
//! `File -> Open...`. The call must be fast: look at the extension, or at most
//! a few header bytes, and decide whether the path is yours.
//!
//! - If it is not, return `Ok(None)`. Never report "unrecognized format"
//!   as an error, and never return a loader that does nothing.
//! - If it is, return `Ok(Some(loader))`, where `loader` is a *new*
//!   [`ReaderFunction`] that accepts the same path argument and does the
//!   actual reading.
//!
//! The loader returns a `Vec<LayerData>`, one record per layer to create.
//! Each record carries `data`, optional `metadata` and an optional `kind`;
//! the tuple conversions on [`LayerData`] mirror the `(data,)`,
//! `(data, meta)` and `(data, meta, kind)` shapes.
//!
//! The path argument is a [`ReaderPath`]: either one location or a list of
//! locations. A list can be assumed to be parts of one larger
//! multi-dimensional dataset (for instance 2D planes that should be stacked
//! along a new axis). Plugins must check which shape they received and handle
//! each as they see fit.
//!
//! The host asks plugins one at a time in call order and stops at the first
//! that returns a loader. Errors returned from `get_reader` are logged and the
//! next plugin is asked; I/O and decoding failures belong in the loader.
//!
//! [`ReaderPlugin::get_reader`]: crate::plugin_system::traits::ReaderPlugin::get_reader
//! [`LayerData`]: crate::io::LayerData
use std::fmt;

use crate::io::{LayerData, ReadError, ReaderPath};

/// Loader returned by a successful reader lookup.
pub type ReaderFunction =
    Box<dyn Fn(&ReaderPath) -> Result<Vec<LayerData>, ReadError> + Send + Sync>;

/// Box a closure as a [`ReaderFunction`].
pub fn reader_fn<F>(f: F) -> ReaderFunction
where
    F: Fn(&ReaderPath) -> Result<Vec<LayerData>, ReadError> + Send + Sync + 'static,
{
    Box::new(f)
}

/// A loader together with the plugin that claimed the path
pub struct Reader {
    plugin_id: String,
    function: ReaderFunction,
}

impl Reader {
    pub fn new(plugin_id: impl Into<String>, function: ReaderFunction) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            function,
        }
    }

    /// Name of the plugin whose hook returned this loader
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Run the loader.
    pub fn read(&self, path: &ReaderPath) -> Result<Vec<LayerData>, ReadError> {
        (self.function)(path)
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("plugin_id", &self.plugin_id)
            .finish_non_exhaustive()
    }
}
