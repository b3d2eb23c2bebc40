//! Builtin reader for PNG and netpbm (PGM/PPM/PNM) rasters.
//!
//! A single path becomes one image layer. A list of paths is read as a stack
//! of planes and becomes one image layer with a new leading axis.
use std::fs::File;
use std::io::{ErrorKind, Read};

use image::{DynamicImage, ImageError, ImageFormat};
use iris_core::io::{ArrayData, LayerData, LayerKind, ReadError, ReaderPath};
use iris_core::plugin_system::{
    reader_fn, PluginError, PluginPriority, ReaderFunction, ReaderPlugin, VersionRange,
};
use log::debug;

pub const PLUGIN_NAME: &str = "core-image-reader";

const EXTENSIONS: &[&str] = &["png", "pgm", "ppm", "pnm"];
const SNIFF_LEN: usize = 16;

#[derive(Debug, Default)]
pub struct ImageReaderPlugin;

impl ImageReaderPlugin {
    pub fn new() -> Self {
        Self
    }
}

/// Check the leading bytes of `location` against the format its extension
/// promises. `Ok(true)` for files that do not exist yet.
fn header_matches(location: &str) -> Result<bool, PluginError> {
    let mut file = match File::open(location) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(true),
        Err(source) => {
            return Err(PluginError::Io {
                path: location.to_string(),
                source,
            });
        }
    };
    let mut header = Vec::with_capacity(SNIFF_LEN);
    file.by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut header)
        .map_err(|source| PluginError::Io {
            path: location.to_string(),
            source,
        })?;

    let expected = ReaderPath::extension_of(location).and_then(ImageFormat::from_extension);
    match (image::guess_format(&header), expected) {
        (Ok(found), Some(expected)) => Ok(found == expected),
        _ => Ok(false),
    }
}

fn decode_error(location: &str, error: ImageError) -> ReadError {
    match error {
        ImageError::IoError(source) => ReadError::io(source, location),
        other => ReadError::invalid(location, "image", other.to_string()),
    }
}

/// Decode one file. Gray images are `[h, w]`, color images `[h, w, c]`.
fn read_plane(location: &str) -> Result<ArrayData, ReadError> {
    let img = image::open(location).map_err(|e| decode_error(location, e))?;
    Ok(to_array(img)?)
}

fn to_array(img: DynamicImage) -> Result<ArrayData, iris_core::io::DataError> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    let color = img.color();
    let wide = color.bytes_per_pixel() / color.channel_count() > 1;

    let (channels, values): (usize, Vec<f64>) = match (color.channel_count(), wide) {
        (1 | 2, false) => (1, widen(img.to_luma8().into_raw())),
        (1 | 2, true) => (1, widen(img.to_luma16().into_raw())),
        (3, false) => (3, widen(img.to_rgb8().into_raw())),
        (3, true) => (3, widen(img.to_rgb16().into_raw())),
        (_, false) => (4, widen(img.to_rgba8().into_raw())),
        (_, true) => (4, widen(img.to_rgba16().into_raw())),
    };

    let shape = if channels == 1 {
        vec![height, width]
    } else {
        vec![height, width, channels]
    };
    ArrayData::from_shape_vec(shape, values)
}

fn widen<T: Into<f64>>(raw: Vec<T>) -> Vec<f64> {
    raw.into_iter().map(Into::into).collect()
}

fn load(path: &ReaderPath) -> Result<Vec<LayerData>, ReadError> {
    // Color planes carry a trailing channel axis
    let (data, rgb) = match path {
        ReaderPath::Single(location) => {
            let plane = read_plane(location)?;
            let rgb = plane.ndim() == 3;
            (plane, rgb)
        }
        ReaderPath::Many(locations) => {
            let mut planes: Vec<ArrayData> = Vec::with_capacity(locations.len());
            for location in locations {
                let plane = read_plane(location)?;
                if let Some(first) = planes.first() {
                    if first.shape() != plane.shape() {
                        return Err(ReadError::ShapeMismatch {
                            path: location.clone(),
                            expected: first.shape().to_vec(),
                            found: plane.shape().to_vec(),
                        });
                    }
                }
                planes.push(plane);
            }
            let rgb = planes.first().is_some_and(|plane| plane.ndim() == 3);
            (ArrayData::stack(planes)?, rgb)
        }
    };

    Ok(vec![LayerData::new(data)
        .with_kind(LayerKind::Image)
        .with_meta("rgb", rgb)])
}

impl ReaderPlugin for ImageReaderPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn priority(&self) -> PluginPriority {
        PluginPriority::Fallback(200)
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        VersionRange::from_constraint("^0.1").into_iter().collect()
    }

    fn file_extensions(&self) -> Vec<String> {
        EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
    }

    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError> {
        if !path.all_have_extension(EXTENSIONS) {
            return Ok(None);
        }
        for location in path.iter() {
            if !header_matches(location)? {
                debug!("{} has an image extension but not a matching header", location);
                return Ok(None);
            }
        }
        Ok(Some(reader_fn(load)))
    }
}

#[cfg(test)]
mod tests;
