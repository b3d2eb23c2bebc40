//! # Iris Core Viewer Model
//!
//! The consumer of reader output. [`Viewer::open_path`] asks the reader
//! plugins for a loader, runs it, and turns every returned
//! [`LayerData`](crate::io::LayerData) record into a [`Layer`] in the
//! viewer's [`LayerList`]. Rendering is not part of this crate.
pub mod error;
pub mod layer;
pub mod model;

pub use error::ViewerError;
pub use layer::{Layer, LayerList, LayerSource};
pub use model::{OpenOptions, Viewer};
