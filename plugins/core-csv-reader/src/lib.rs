//! Builtin reader for CSV coordinate tables.
//!
//! The header row names the axes; each following row is one point. A leading
//! `index` column, as written by most dataframe libraries, is dropped.
use csv::{ErrorKind, ReaderBuilder};
use iris_core::io::{ArrayData, LayerData, LayerKind, ReadError, ReaderPath};
use iris_core::plugin_system::{
    reader_fn, PluginError, PluginPriority, ReaderFunction, ReaderPlugin, VersionRange,
};
use log::debug;
use serde_json::Value;

pub const PLUGIN_NAME: &str = "core-csv-reader";

const INDEX_COLUMN: &str = "index";

#[derive(Debug, Default)]
pub struct CsvReaderPlugin;

impl CsvReaderPlugin {
    pub fn new() -> Self {
        Self
    }
}

fn csv_error(location: &str, error: csv::Error) -> ReadError {
    let message = error.to_string();
    match error.into_kind() {
        ErrorKind::Io(source) => ReadError::io(source, location),
        _ => ReadError::invalid(location, "CSV", message),
    }
}

/// Read one table into a points layer.
fn read_table(location: &str) -> Result<LayerData, ReadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(location)
        .map_err(|e| csv_error(location, e))?;

    let headers = reader.headers().map_err(|e| csv_error(location, e))?.clone();
    let skip = usize::from(headers.get(0) == Some(INDEX_COLUMN));
    let columns: Vec<String> = headers.iter().skip(skip).map(str::to_string).collect();
    if columns.is_empty() {
        return Err(ReadError::invalid(location, "CSV", "no coordinate columns"));
    }

    let mut values = Vec::new();
    let mut rows = 0;
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(location, e))?;
        rows += 1;
        for (column, cell) in columns.iter().zip(record.iter().skip(skip)) {
            let value = cell.parse::<f64>().map_err(|_| {
                ReadError::invalid(
                    location,
                    "CSV",
                    format!("row {}, column '{}': '{}' is not a number", rows, column, cell),
                )
            })?;
            values.push(value);
        }
    }
    debug!("Read {} points with {} columns from {}", rows, columns.len(), location);

    let data = ArrayData::from_shape_vec(vec![rows, columns.len()], values)?;
    let mut layer = LayerData::new(data)
        .with_kind(LayerKind::Points)
        .with_meta(
            "columns",
            Value::Array(columns.into_iter().map(Value::String).collect()),
        );
    if let Some(stem) = ReaderPath::single(location).first_stem() {
        layer = layer.with_meta("name", stem);
    }
    Ok(layer)
}

fn load(path: &ReaderPath) -> Result<Vec<LayerData>, ReadError> {
    path.iter().map(read_table).collect()
}

impl ReaderPlugin for CsvReaderPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn priority(&self) -> PluginPriority {
        PluginPriority::Fallback(210)
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        VersionRange::from_constraint("^0.1").into_iter().collect()
    }

    fn file_extensions(&self) -> Vec<String> {
        vec!["csv".to_string()]
    }

    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError> {
        if path.all_have_extension(&["csv"]) {
            Ok(Some(reader_fn(load)))
        } else {
            Ok(None)
        }
    }
}
