use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};
use serde::Serialize;

use crate::io::ReaderPath;
use crate::plugin_system::error::{HookCallError, PluginSystemError, Result};
use crate::plugin_system::hook::Reader;
use crate::plugin_system::traits::{PluginPriority, ReaderPlugin};
use crate::plugin_system::version::ApiVersion;

struct RegisteredPlugin {
    plugin: Arc<dyn ReaderPlugin>,
    /// Registration order, used to break priority ties
    sequence: u64,
}

/// Snapshot of a registered plugin, for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
    pub name: String,
    pub version: String,
    pub priority: PluginPriority,
    pub enabled: bool,
    pub extensions: Vec<String>,
}

/// Registry of reader plugins and the "first result wins" dispatcher.
pub struct PluginRegistry {
    plugins: HashMap<String, RegisteredPlugin>,
    enabled: HashSet<String>,
    /// Explicit user ordering; these plugins are asked first
    call_order: Vec<String>,
    next_sequence: u64,
    api_version: ApiVersion,
}

impl PluginRegistry {
    pub fn new(api_version: ApiVersion) -> Self {
        Self {
            plugins: HashMap::new(),
            enabled: HashSet::new(),
            call_order: Vec::new(),
            next_sequence: 0,
            api_version,
        }
    }

    /// Register a plugin. New plugins are enabled.
    pub fn register_plugin(&mut self, plugin: Arc<dyn ReaderPlugin>) -> Result<()> {
        let id = plugin.name().to_string();
        if id.trim().is_empty() {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: id,
                message: "plugin name must not be empty".to_string(),
            });
        }
        if self.plugins.contains_key(&id) {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: id,
                message: "a plugin with this name is already registered".to_string(),
            });
        }

        let compatible = plugin
            .compatible_api_versions()
            .iter()
            .any(|range| range.includes_api(&self.api_version));
        if !compatible {
            return Err(PluginSystemError::IncompatibleApi {
                plugin_id: id,
                api_version: self.api_version.to_string(),
            });
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        info!(
            "Registered reader plugin '{}' v{} ({})",
            id,
            plugin.version(),
            plugin.priority()
        );
        self.plugins.insert(id.clone(), RegisteredPlugin { plugin, sequence });
        self.enabled.insert(id);
        Ok(())
    }

    pub fn unregister_plugin(&mut self, id: &str) -> Result<Arc<dyn ReaderPlugin>> {
        let entry = self
            .plugins
            .remove(id)
            .ok_or_else(|| PluginSystemError::PluginNotFound(id.to_string()))?;
        self.enabled.remove(id);
        self.call_order.retain(|name| name != id);
        Ok(entry.plugin)
    }

    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn get_plugin(&self, id: &str) -> Option<Arc<dyn ReaderPlugin>> {
        self.plugins.get(id).map(|entry| entry.plugin.clone())
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    pub fn enable_plugin(&mut self, id: &str) -> Result<()> {
        if !self.has_plugin(id) {
            return Err(PluginSystemError::PluginNotFound(id.to_string()));
        }
        if self.enabled.insert(id.to_string()) {
            debug!("Reader plugin '{}' enabled", id);
        }
        Ok(())
    }

    pub fn disable_plugin(&mut self, id: &str) -> Result<()> {
        if !self.has_plugin(id) {
            return Err(PluginSystemError::PluginNotFound(id.to_string()));
        }
        if self.enabled.remove(id) {
            debug!("Reader plugin '{}' disabled", id);
        }
        Ok(())
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.contains(id)
    }

    /// Set an explicit call order.
    ///
    /// Every name must be registered and appear once. Plugins not named keep
    /// their priority order after the named ones.
    pub fn set_call_order(&mut self, order: Vec<String>) -> Result<()> {
        let mut seen = HashSet::new();
        for name in &order {
            if !self.has_plugin(name) {
                return Err(PluginSystemError::InvalidCallOrder(format!(
                    "unknown plugin '{}'",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(PluginSystemError::InvalidCallOrder(format!(
                    "plugin '{}' listed more than once",
                    name
                )));
            }
        }
        debug!("Reader call order set to {:?}", order);
        self.call_order = order;
        Ok(())
    }

    /// All registered plugin names in the order the dispatcher asks them.
    pub fn call_order(&self) -> Vec<String> {
        let mut remaining: Vec<&RegisteredPlugin> = self
            .plugins
            .iter()
            .filter(|(id, _)| !self.call_order.contains(*id))
            .map(|(_, entry)| entry)
            .collect();
        remaining.sort_by_key(|entry| (entry.plugin.priority(), entry.sequence));

        self.call_order
            .iter()
            .cloned()
            .chain(remaining.iter().map(|entry| entry.plugin.name().to_string()))
            .collect()
    }

    /// Enabled plugins in call order
    pub fn hook_implementations(&self) -> Vec<Arc<dyn ReaderPlugin>> {
        self.call_order()
            .iter()
            .filter(|id| self.is_enabled(id))
            .filter_map(|id| self.get_plugin(id))
            .collect()
    }

    /// Find a reader for `path`.
    ///
    /// With `plugin` set, only that plugin is asked. Otherwise enabled plugins
    /// are asked in call order and the first loader returned wins. When nobody
    /// claims the path the result is [`PluginSystemError::NoReaderFound`].
    pub fn get_reader(&self, path: &ReaderPath, plugin: Option<&str>) -> Result<Reader> {
        match plugin {
            Some(id) => self.get_reader_from(path, id),
            None => self.get_first_reader(path),
        }
    }

    fn get_reader_from(&self, path: &ReaderPath, id: &str) -> Result<Reader> {
        let plugin = self
            .get_plugin(id)
            .ok_or_else(|| PluginSystemError::PluginNotFound(id.to_string()))?;
        if !self.is_enabled(id) {
            return Err(PluginSystemError::PluginDisabled(id.to_string()));
        }

        match plugin.get_reader(path) {
            Ok(Some(function)) => {
                debug!("Plugin '{}' claimed {}", id, path);
                Ok(Reader::new(id, function))
            }
            Ok(None) => Err(PluginSystemError::ReaderDeclined {
                plugin_id: id.to_string(),
                path: path.to_string(),
            }),
            Err(source) => Err(PluginSystemError::HookFailed {
                plugin_id: id.to_string(),
                path: path.to_string(),
                source,
            }),
        }
    }

    fn get_first_reader(&self, path: &ReaderPath) -> Result<Reader> {
        let mut errors = Vec::new();

        for plugin in self.hook_implementations() {
            let id = plugin.name();
            match plugin.get_reader(path) {
                Ok(Some(function)) => {
                    debug!("Plugin '{}' claimed {}", id, path);
                    return Ok(Reader::new(id, function));
                }
                Ok(None) => debug!("Plugin '{}' does not recognize {}", id, path),
                Err(e) => {
                    warn!("Reader hook of plugin '{}' failed for {}: {}", id, path, e);
                    errors.push(HookCallError {
                        plugin_id: id.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(PluginSystemError::NoReaderFound {
            path: path.to_string(),
            errors,
        })
    }

    /// Info for every registered plugin in call order
    pub fn plugin_infos(&self) -> Vec<PluginInfo> {
        self.call_order()
            .iter()
            .filter_map(|id| {
                self.get_plugin(id).map(|plugin| PluginInfo {
                    name: id.clone(),
                    version: plugin.version().to_string(),
                    priority: plugin.priority(),
                    enabled: self.is_enabled(id),
                    extensions: plugin.file_extensions(),
                })
            })
            .collect()
    }
}
