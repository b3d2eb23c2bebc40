use serde::Serialize;

use crate::io::{ArrayData, LayerKind, Metadata, ReaderPath};
use crate::viewer::error::ViewerError;

/// Where a layer's data came from
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LayerSource {
    pub path: Option<ReaderPath>,
    pub reader_plugin: Option<String>,
}

impl LayerSource {
    pub fn new(path: ReaderPath, reader_plugin: impl Into<String>) -> Self {
        Self {
            path: Some(path),
            reader_plugin: Some(reader_plugin.into()),
        }
    }
}

/// A layer held by the viewer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
    pub data: ArrayData,
    pub metadata: Metadata,
    pub source: LayerSource,
}

/// Ordered list of layers with unique names
#[derive(Debug, Clone, Default)]
pub struct LayerList {
    layers: Vec<Layer>,
}

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer, renaming it if the name is taken.
    ///
    /// A taken name `cells` becomes `cells [1]`, `cells [2]`, ... using the
    /// smallest free suffix. Returns the final name.
    pub fn push(&mut self, mut layer: Layer) -> String {
        layer.name = self.unique_name(&layer.name);
        let name = layer.name.clone();
        self.layers.push(layer);
        name
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{} [{}]", base, n))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Result<Layer, ViewerError> {
        let index = self
            .layers
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| ViewerError::LayerNotFound(name.to_string()))?;
        Ok(self.layers.remove(index))
    }

    pub fn names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
