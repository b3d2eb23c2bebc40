use thiserror::Error;

use crate::io::LayerKind;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Invalid data for {kind} layer: {reason}")]
    InvalidLayerData { kind: LayerKind, reason: String },

    #[error("Layer not found: {0}")]
    LayerNotFound(String),
}
