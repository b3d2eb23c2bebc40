//! # Iris Core Plugin System
//!
//! Reader plugins extend the viewer with new file formats. This module holds
//! the reader hook contract and the host-side machinery that queries it.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`hook`]**: The reader hook contract: [`ReaderFunction`], [`Reader`],
//!   and the documentation plugin authors write against.
//! - **[`traits`]**: The [`ReaderPlugin`] trait and [`PluginPriority`].
//! - **[`registry`]**: [`PluginRegistry`], which keeps registered plugins,
//!   their enabled state and call order, and performs "first result wins"
//!   reader lookup.
//! - **[`manager`]**: [`ReaderManager`] and [`DefaultReaderManager`], the
//!   async façade that resolves a reader and runs it off the async runtime.
//! - **[`version`]**: API version compatibility checks.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError) and
//!   [`PluginError`](error::PluginError).
pub mod error;
pub mod hook;
pub mod manager;
pub mod registry;
pub mod traits;
pub mod version;

pub use error::{HookCallError, PluginError, PluginSystemError};
pub use hook::{reader_fn, Reader, ReaderFunction};
pub use manager::{DefaultReaderManager, ReadOutcome, ReaderManager};
pub use registry::{PluginInfo, PluginRegistry};
pub use traits::{PluginPriority, ReaderPlugin};
pub use version::{ApiVersion, VersionRange};

#[cfg(test)]
pub(crate) mod tests;
