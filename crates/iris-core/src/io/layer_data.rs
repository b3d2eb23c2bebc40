use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Open key/value mapping attached to a layer.
///
/// Well-known keys are `name` (the layer name) and `contrast_limits`
/// (`[min, max]` for images). Everything else is passed through untouched.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Errors raised while building or combining array payloads
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("Shape {shape:?} describes {expected} values but {actual} were supplied")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Cannot stack arrays with shapes {first:?} and {other:?}")]
    StackShapeMismatch { first: Vec<usize>, other: Vec<usize> },

    #[error("Cannot stack an empty list of arrays")]
    EmptyStack,

    #[error("Unknown layer kind: '{0}'")]
    UnknownLayerKind(String),
}

/// Dense, row-major n-dimensional array of `f64` values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayData {
    shape: Vec<usize>,
    values: Vec<f64>,
}

impl ArrayData {
    /// Build an array, checking that `shape` accounts for every value.
    pub fn from_shape_vec(shape: Vec<usize>, values: Vec<f64>) -> Result<Self, DataError> {
        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(DataError::ShapeMismatch {
                shape,
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { shape, values })
    }

    pub fn zeros(shape: Vec<usize>) -> Self {
        let len = shape.iter().product();
        Self {
            shape,
            values: vec![0.0; len],
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Value at a full n-dimensional index, `None` when out of bounds
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.values.get(offset).copied()
    }

    /// Minimum and maximum finite value, `None` if there are none
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Stack equally shaped arrays along a new leading axis.
    pub fn stack(arrays: Vec<ArrayData>) -> Result<Self, DataError> {
        let first_shape = match arrays.first() {
            Some(first) => first.shape.clone(),
            None => return Err(DataError::EmptyStack),
        };
        if let Some(other) = arrays.iter().find(|a| a.shape != first_shape) {
            return Err(DataError::StackShapeMismatch {
                first: first_shape,
                other: other.shape.clone(),
            });
        }

        let mut shape = Vec::with_capacity(first_shape.len() + 1);
        shape.push(arrays.len());
        shape.extend_from_slice(&first_shape);

        let values = arrays.into_iter().flat_map(|a| a.values).collect();
        Ok(Self { shape, values })
    }
}

/// The kind of layer a record should become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// No kind given; the viewer decides (images by default)
    #[default]
    Unspecified,
    Image,
    Labels,
    Points,
    Shapes,
    Surface,
    Vectors,
    Tracks,
}

impl LayerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Unspecified => "unspecified",
            LayerKind::Image => "image",
            LayerKind::Labels => "labels",
            LayerKind::Points => "points",
            LayerKind::Shapes => "shapes",
            LayerKind::Surface => "surface",
            LayerKind::Vectors => "vectors",
            LayerKind::Tracks => "tracks",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unspecified" | "" => Ok(LayerKind::Unspecified),
            "image" => Ok(LayerKind::Image),
            "labels" => Ok(LayerKind::Labels),
            "points" => Ok(LayerKind::Points),
            "shapes" => Ok(LayerKind::Shapes),
            "surface" => Ok(LayerKind::Surface),
            "vectors" => Ok(LayerKind::Vectors),
            "tracks" => Ok(LayerKind::Tracks),
            _ => Err(DataError::UnknownLayerKind(s.to_string())),
        }
    }
}

/// One layer to create, as returned by a loader.
///
/// Only `data` is mandatory. Loaders that have nothing to say about metadata
/// or kind can build a record from a one-element tuple:
///
/// ```
/// use iris_core::io::{ArrayData, LayerData, LayerKind};
///
/// let record = LayerData::from((ArrayData::zeros(vec![4, 4]),));
/// assert!(record.metadata.is_empty());
/// assert_eq!(record.kind, LayerKind::Unspecified);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerData {
    pub data: ArrayData,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub kind: LayerKind,
}

impl LayerData {
    pub fn new(data: ArrayData) -> Self {
        Self {
            data,
            metadata: Metadata::new(),
            kind: LayerKind::Unspecified,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_kind(mut self, kind: LayerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Insert a single metadata entry
    pub fn with_meta(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }

    /// Layer name carried in metadata, if any
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(|v| v.as_str())
    }
}

impl From<(ArrayData,)> for LayerData {
    fn from((data,): (ArrayData,)) -> Self {
        LayerData::new(data)
    }
}

impl From<(ArrayData, Metadata)> for LayerData {
    fn from((data, metadata): (ArrayData, Metadata)) -> Self {
        LayerData::new(data).with_metadata(metadata)
    }
}

impl From<(ArrayData, Metadata, LayerKind)> for LayerData {
    fn from((data, metadata, kind): (ArrayData, Metadata, LayerKind)) -> Self {
        LayerData::new(data).with_metadata(metadata).with_kind(kind)
    }
}
