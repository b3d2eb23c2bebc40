use crate::io::{ArrayData, LayerData, LayerKind, ReadError, ReaderPath};
use crate::kernel::Application;
use crate::plugin_system::error::PluginError;
use crate::plugin_system::hook::{reader_fn, ReaderFunction};
use crate::plugin_system::traits::{PluginPriority, ReaderPlugin};
use crate::plugin_system::version::VersionRange;
use std::fs;
use std::str::FromStr;
use std::sync::Arc;

/// Reads `.pts` files: one point per line, whitespace separated coordinates.
pub struct PointsTextPlugin;

fn read_points(location: &str) -> Result<ArrayData, ReadError> {
    let text = fs::read_to_string(location).map_err(|e| ReadError::io(e, location))?;
    let mut values = Vec::new();
    let mut columns = None;
    let mut rows = 0;
    for (line_no, line) in text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
        let row = line
            .split_whitespace()
            .map(|cell| {
                cell.parse::<f64>().map_err(|_| {
                    ReadError::invalid(location, "points", format!("line {}: '{}'", line_no + 1, cell))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match columns {
            None => columns = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(ReadError::invalid(
                    location,
                    "points",
                    format!("line {} has {} columns, expected {}", line_no + 1, row.len(), n),
                ));
            }
            _ => {}
        }
        values.extend(row);
        rows += 1;
    }
    Ok(ArrayData::from_shape_vec(vec![rows, columns.unwrap_or(0)], values)?)
}

impl ReaderPlugin for PointsTextPlugin {
    fn name(&self) -> &str {
        "points-text"
    }
    fn version(&self) -> &str {
        "0.1.0"
    }
    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        vec![VersionRange::from_str("^0.1").unwrap()]
    }
    fn file_extensions(&self) -> Vec<String> {
        vec!["pts".to_string()]
    }
    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError> {
        if !path.all_have_extension(&["pts"]) {
            return Ok(None);
        }
        Ok(Some(reader_fn(|path: &ReaderPath| {
            path.iter()
                .map(|location| {
                    Ok(LayerData::new(read_points(location)?)
                        .with_kind(LayerKind::Points)
                        .with_meta("size", 2.0))
                })
                .collect()
        })))
    }
}

/// Raises a hook error for every path; sits in front of everything else.
pub struct BrokenPlugin;

impl ReaderPlugin for BrokenPlugin {
    fn name(&self) -> &str {
        "broken"
    }
    fn version(&self) -> &str {
        "0.1.0"
    }
    fn priority(&self) -> PluginPriority {
        PluginPriority::High(0)
    }
    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        vec![VersionRange::from_str("^0.1").unwrap()]
    }
    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError> {
        Err(PluginError::ResolutionError(format!("cannot inspect {}", path)))
    }
}

pub async fn setup_app() -> Application {
    let app = Application::new().unwrap();
    app.register_plugin(Arc::new(BrokenPlugin)).await.unwrap();
    app.register_plugin(Arc::new(PointsTextPlugin)).await.unwrap();
    app
}
