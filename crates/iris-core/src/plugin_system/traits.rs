use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::io::ReaderPath;
use crate::plugin_system::error::PluginError;
use crate::plugin_system::hook::ReaderFunction;
use crate::plugin_system::version::VersionRange;

/// Priority tiers for reader plugins.
///
/// Lower values are asked first. Ranges are disjoint, so ordering by tier and
/// then by value is the same as ordering by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluginPriority {
    /// Specialized readers that should win over everything else (0-99)
    High(u8),
    /// Standard third-party readers (100-199)
    Normal(u8),
    /// Generic readers tried last, such as the builtins (200-255)
    Fallback(u8),
}

impl PluginPriority {
    pub fn value(&self) -> u8 {
        match self {
            PluginPriority::High(val)
            | PluginPriority::Normal(val)
            | PluginPriority::Fallback(val) => *val,
        }
    }

    fn tier(&self) -> &'static str {
        match self {
            PluginPriority::High(_) => "high",
            PluginPriority::Normal(_) => "normal",
            PluginPriority::Fallback(_) => "fallback",
        }
    }
}

impl Default for PluginPriority {
    fn default() -> Self {
        PluginPriority::Normal(150)
    }
}

impl fmt::Display for PluginPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tier(), self.value())
    }
}

/// Error returned when a priority string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid plugin priority '{0}' (expected e.g. 'high:10', 'normal:150', 'fallback:250')")]
pub struct ParsePriorityError(pub String);

impl FromStr for PluginPriority {
    type Err = ParsePriorityError;

    /// Parse a priority string like "normal:150"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePriorityError(s.to_string());
        let (tier, value) = s.split_once(':').ok_or_else(err)?;
        let value: u8 = value.parse().map_err(|_| err())?;

        match tier.to_lowercase().as_str() {
            "high" if value <= 99 => Ok(PluginPriority::High(value)),
            "normal" if (100..=199).contains(&value) => Ok(PluginPriority::Normal(value)),
            "fallback" if value >= 200 => Ok(PluginPriority::Fallback(value)),
            _ => Err(err()),
        }
    }
}

impl Serialize for PluginPriority {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Trait every reader plugin implements.
///
/// See [`crate::plugin_system::hook`] for the full calling contract of
/// [`get_reader`](ReaderPlugin::get_reader).
pub trait ReaderPlugin: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    fn version(&self) -> &str;

    fn priority(&self) -> PluginPriority {
        PluginPriority::default()
    }

    /// Host API versions this plugin was written against
    fn compatible_api_versions(&self) -> Vec<VersionRange>;

    /// Extensions this plugin usually claims (lowercase, no dot).
    /// Only used for display; the hook decides.
    fn file_extensions(&self) -> Vec<String> {
        Vec::new()
    }

    /// Return a loader for `path`, or `None` if the format is not recognized.
    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError>;
}
