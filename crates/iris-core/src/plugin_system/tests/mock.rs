use crate::io::{ArrayData, LayerData, LayerKind, ReadError, ReaderPath};
use crate::plugin_system::error::PluginError;
use crate::plugin_system::hook::{reader_fn, ReaderFunction};
use crate::plugin_system::traits::{PluginPriority, ReaderPlugin};
use crate::plugin_system::version::VersionRange;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

/// What the mock hook does when asked
#[derive(Clone)]
pub enum MockBehavior {
    /// Claim paths whose every location ends in this extension
    Claim(&'static str),
    /// Never claim anything
    Decline,
    /// Return a hook error for every path
    Fail,
    /// Claim everything, but the loader fails
    ClaimThenFailLoad,
}

pub struct MockReaderPlugin {
    pub id: String,
    pub priority: PluginPriority,
    pub behavior: MockBehavior,
    pub compatible_apis: Vec<VersionRange>,
    pub calls: Arc<AtomicUsize>,
    pub call_tracker: Option<Arc<StdMutex<Vec<String>>>>,
}

impl MockReaderPlugin {
    pub fn new(id: &str, behavior: MockBehavior) -> Self {
        Self {
            id: id.to_string(),
            priority: PluginPriority::default(),
            behavior,
            compatible_apis: vec![VersionRange::from_str(">=0.1.0").unwrap()],
            calls: Arc::new(AtomicUsize::new(0)),
            call_tracker: None,
        }
    }

    pub fn with_priority(mut self, priority: PluginPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tracker(mut self, tracker: Arc<StdMutex<Vec<String>>>) -> Self {
        self.call_tracker = Some(tracker);
        self
    }

    pub fn with_apis(mut self, apis: Vec<VersionRange>) -> Self {
        self.compatible_apis = apis;
        self
    }

    pub fn call_count(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

/// One 2x2 layer per location, named after the plugin, tagged with the index
pub fn mock_loader(plugin_id: String) -> ReaderFunction {
    reader_fn(move |path: &ReaderPath| {
        Ok(path
            .iter()
            .enumerate()
            .map(|(i, _)| {
                LayerData::new(ArrayData::zeros(vec![2, 2]))
                    .with_meta("name", format!("{}-{}", plugin_id, i))
                    .with_kind(LayerKind::Image)
            })
            .collect())
    })
}

impl ReaderPlugin for MockReaderPlugin {
    fn name(&self) -> &str {
        &self.id
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn priority(&self) -> PluginPriority {
        self.priority
    }

    fn compatible_api_versions(&self) -> Vec<VersionRange> {
        self.compatible_apis.clone()
    }

    fn file_extensions(&self) -> Vec<String> {
        match self.behavior {
            MockBehavior::Claim(ext) => vec![ext.to_string()],
            _ => vec![],
        }
    }

    fn get_reader(&self, path: &ReaderPath) -> Result<Option<ReaderFunction>, PluginError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(tracker) = &self.call_tracker {
            tracker.lock().unwrap().push(self.id.clone());
        }
        match self.behavior {
            MockBehavior::Claim(ext) => {
                if path.all_have_extension(&[ext]) {
                    Ok(Some(mock_loader(self.id.clone())))
                } else {
                    Ok(None)
                }
            }
            MockBehavior::Decline => Ok(None),
            MockBehavior::Fail => Err(PluginError::ResolutionError(format!(
                "{} exploded while sniffing",
                self.id
            ))),
            MockBehavior::ClaimThenFailLoad => Ok(Some(reader_fn(|path: &ReaderPath| {
                Err(ReadError::invalid(path.to_string(), "mock", "corrupt payload"))
            }))),
        }
    }
}
