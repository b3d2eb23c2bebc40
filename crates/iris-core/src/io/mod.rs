//! # Iris Core I/O Types
//!
//! The values exchanged across the reader hook boundary.
//!
//! - **[`path`]**: [`ReaderPath`], the path argument handed to reader plugins.
//!   It is either a single location or an ordered list of locations, and it is
//!   never normalized from one shape into the other.
//! - **[`layer_data`]**: [`LayerData`], the record a loader returns for each
//!   layer to create, along with its payload ([`ArrayData`]), [`Metadata`]
//!   and [`LayerKind`].
//! - **[`error`]**: [`ReadError`], the failures a loader may report while
//!   actually reading data.
//!
//! These values are transient: a plugin builds them in response to a single
//! query and the caller consumes them immediately.
pub mod error;
pub mod layer_data;
pub mod path;

pub use error::ReadError;
pub use layer_data::{ArrayData, DataError, LayerData, LayerKind, Metadata};
pub use path::ReaderPath;
