use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Path argument passed to reader plugins and to the loaders they return.
///
/// A list of paths is usually one logical dataset split over several files,
/// for example 2D planes that belong to one 3D stack. Implementations decide
/// for themselves how to treat each shape; nothing here collapses a
/// one-element list into a single path or vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReaderPath {
    /// A file, directory, or resource such as a URL
    Single(String),
    /// Ordered list of locations
    Many(Vec<String>),
}

impl ReaderPath {
    pub fn single(path: impl Into<String>) -> Self {
        ReaderPath::Single(path.into())
    }

    pub fn many<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReaderPath::Many(paths.into_iter().map(Into::into).collect())
    }

    /// Whether this is the list shape, regardless of its length
    pub fn is_many(&self) -> bool {
        matches!(self, ReaderPath::Many(_))
    }

    /// Number of locations carried
    pub fn len(&self) -> usize {
        match self {
            ReaderPath::Single(_) => 1,
            ReaderPath::Many(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every location in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            ReaderPath::Single(path) => std::slice::from_ref(path),
            ReaderPath::Many(paths) => paths.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// First location, if any
    pub fn first(&self) -> Option<&str> {
        self.iter().next()
    }

    /// Split into one single-path argument per location.
    pub fn split(&self) -> Vec<ReaderPath> {
        self.iter().map(ReaderPath::single).collect()
    }

    /// Lowercase extension of `path` without the leading dot.
    ///
    /// For URLs the query string and fragment are ignored, so
    /// `https://host/cells.png?raw=1` reports `png`. Local paths keep `?` and
    /// `#` as ordinary file name characters.
    pub fn extension_of(path: &str) -> Option<String> {
        Path::new(strip_url_suffix(path))
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Whether every location ends in one of `extensions` (lowercase, no dot).
    ///
    /// An empty list never matches.
    pub fn all_have_extension(&self, extensions: &[&str]) -> bool {
        !self.is_empty()
            && self.iter().all(|path| {
                Self::extension_of(path)
                    .map(|ext| extensions.contains(&ext.as_str()))
                    .unwrap_or(false)
            })
    }

    /// File stem of the first location, used for default layer names
    pub fn first_stem(&self) -> Option<String> {
        let first = self.first()?;
        Path::new(strip_url_suffix(first))
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
    }
}

/// Drop the query and fragment of a URL; anything without a scheme is
/// returned unchanged.
fn strip_url_suffix(location: &str) -> &str {
    if !location.contains("://") {
        return location;
    }
    location.split(['?', '#']).next().unwrap_or(location)
}

impl fmt::Display for ReaderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderPath::Single(path) => write!(f, "{}", path),
            ReaderPath::Many(paths) => write!(f, "[{}]", paths.join(", ")),
        }
    }
}

impl From<&str> for ReaderPath {
    fn from(path: &str) -> Self {
        ReaderPath::Single(path.to_string())
    }
}

impl From<String> for ReaderPath {
    fn from(path: String) -> Self {
        ReaderPath::Single(path)
    }
}

impl From<&Path> for ReaderPath {
    fn from(path: &Path) -> Self {
        ReaderPath::Single(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for ReaderPath {
    fn from(path: PathBuf) -> Self {
        ReaderPath::from(path.as_path())
    }
}

impl From<Vec<String>> for ReaderPath {
    fn from(paths: Vec<String>) -> Self {
        ReaderPath::Many(paths)
    }
}

impl From<Vec<&str>> for ReaderPath {
    fn from(paths: Vec<&str>) -> Self {
        ReaderPath::many(paths)
    }
}

impl From<Vec<PathBuf>> for ReaderPath {
    fn from(paths: Vec<PathBuf>) -> Self {
        ReaderPath::many(paths.iter().map(|p| p.to_string_lossy().into_owned()))
    }
}
