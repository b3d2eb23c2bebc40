//! # Iris Core Kernel
//!
//! Application-wide pieces:
//!
//! - **Bootstrapping**: [`Application`](bootstrap::Application) owns the
//!   configuration, the reader manager and the viewer, and applies plugin
//!   settings once the host has registered its plugins.
//! - **Constants**: names, versions and default paths in `constants`.
//! - **Errors**: the top-level [`Error`](error::Error) and `Result` alias.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::Application;
pub use error::{Error, Result};
