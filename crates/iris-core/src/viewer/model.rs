use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{json, Value};

use crate::io::{LayerData, LayerKind, ReaderPath};
use crate::kernel::error::Result;
use crate::plugin_system::manager::ReaderManager;
use crate::viewer::error::ViewerError;
use crate::viewer::layer::{Layer, LayerList, LayerSource};

/// Options for [`Viewer::open_path`]
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    /// Only use this plugin instead of asking all of them
    pub plugin: Option<String>,
    /// Hand a list of paths to the reader as one argument
    pub stack: bool,
}

/// The layer-holding side of the viewer
pub struct Viewer {
    layers: LayerList,
    readers: Arc<dyn ReaderManager>,
}

impl Viewer {
    pub fn new(readers: Arc<dyn ReaderManager>) -> Self {
        Self {
            layers: LayerList::new(),
            readers,
        }
    }

    pub fn layers(&self) -> &LayerList {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerList {
        &mut self.layers
    }

    /// Open `path` through the reader plugins and add the resulting layers.
    ///
    /// Without `stack`, a list of paths is opened one path at a time. Returns
    /// the names of the layers added, in order.
    ///
    /// Opening stops at the first failing path or record. Layers added before
    /// the failure stay in the layer list.
    pub async fn open_path(
        &mut self,
        path: impl Into<ReaderPath>,
        options: &OpenOptions,
    ) -> Result<Vec<String>> {
        let path = path.into();
        if path.is_empty() {
            debug!("open_path called with an empty path list");
            return Ok(Vec::new());
        }

        let requests = if path.is_many() && !options.stack {
            path.split()
        } else {
            vec![path]
        };

        let mut added = Vec::new();
        for request in requests {
            let outcome = self
                .readers
                .read_data(&request, options.plugin.as_deref())
                .await?;
            for record in outcome.layers {
                let source = LayerSource::new(request.clone(), outcome.plugin_id.clone());
                added.push(self.add_layer_from_data(record, source)?);
            }
        }
        Ok(added)
    }

    /// Turn one layer-data record into a layer. Returns the layer name.
    pub fn add_layer_from_data(&mut self, record: LayerData, source: LayerSource) -> Result<String> {
        let LayerData {
            data,
            mut metadata,
            kind,
        } = record;

        let kind = match kind {
            LayerKind::Unspecified => LayerKind::Image,
            other => other,
        };
        validate_shape(kind, data.shape())?;

        let explicit_name = match metadata.remove("name") {
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                warn!("Layer name {} is not a string; falling back to a default name", other);
                metadata.insert("name".to_string(), other);
                None
            }
            None => None,
        };
        let name = explicit_name
            .or_else(|| source.path.as_ref().and_then(ReaderPath::first_stem))
            .unwrap_or_else(|| kind.to_string());

        if kind == LayerKind::Image && !metadata.contains_key("contrast_limits") {
            if let Some((lo, hi)) = data.value_range() {
                metadata.insert("contrast_limits".to_string(), json!([lo, hi]));
            }
        }

        let name = self.layers.push(Layer {
            name,
            kind,
            data,
            metadata,
            source,
        });
        info!("Added {} layer '{}'", kind, name);
        Ok(name)
    }
}

fn validate_shape(kind: LayerKind, shape: &[usize]) -> std::result::Result<(), ViewerError> {
    let ndim = shape.len();
    let reason = match kind {
        LayerKind::Image | LayerKind::Labels if ndim < 2 => {
            Some(format!("expected at least 2 dimensions, got shape {:?}", shape))
        }
        LayerKind::Points | LayerKind::Vectors if ndim != 2 => {
            Some(format!("expected 2 dimensions, got shape {:?}", shape))
        }
        _ => None,
    };
    match reason {
        Some(reason) => Err(ViewerError::InvalidLayerData { kind, reason }),
        None => Ok(()),
    }
}
