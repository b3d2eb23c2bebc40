//! Core of the Iris viewer: the reader plugin system, the layer data model it
//! produces, and the viewer that turns loaded data into layers.
pub mod config;
pub mod io;
pub mod kernel;
pub mod plugin_system;
pub mod viewer;

pub use config::IrisConfig;
pub use io::{ArrayData, LayerData, LayerKind, Metadata, ReadError, ReaderPath};
pub use kernel::Application;
pub use kernel::error::Error as KernelError;
pub use plugin_system::{
    reader_fn, DefaultReaderManager, PluginPriority, ReaderFunction, ReaderManager, ReaderPlugin,
};
pub use viewer::{OpenOptions, Viewer};

#[cfg(test)]
mod tests;
