use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::Mutex;

use crate::io::{LayerData, ReaderPath};
use crate::kernel::constants;
use crate::plugin_system::error::{PluginSystemError, Result};
use crate::plugin_system::hook::Reader;
use crate::plugin_system::registry::{PluginInfo, PluginRegistry};
use crate::plugin_system::traits::ReaderPlugin;
use crate::plugin_system::version::ApiVersion;

/// Layers produced by one successful read
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    /// Plugin whose loader produced the layers
    pub plugin_id: String,
    pub layers: Vec<LayerData>,
}

/// Async interface the viewer and the CLI use to reach reader plugins
#[async_trait]
pub trait ReaderManager: Send + Sync {
    async fn register_plugin(&self, plugin: Arc<dyn ReaderPlugin>) -> Result<()>;

    /// Resolve a reader without running it
    async fn get_reader(&self, path: &ReaderPath, plugin: Option<&str>) -> Result<Reader>;

    /// Resolve a reader and run it
    async fn read_data(&self, path: &ReaderPath, plugin: Option<&str>) -> Result<ReadOutcome>;

    async fn plugin_infos(&self) -> Result<Vec<PluginInfo>>;

    async fn enable_plugin(&self, id: &str) -> Result<()>;

    async fn disable_plugin(&self, id: &str) -> Result<()>;

    async fn is_plugin_enabled(&self, id: &str) -> Result<bool>;

    async fn set_call_order(&self, order: Vec<String>) -> Result<()>;
}

/// Default implementation of the reader manager
#[derive(Clone)]
pub struct DefaultReaderManager {
    registry: Arc<Mutex<PluginRegistry>>,
}

impl DefaultReaderManager {
    /// Create a manager for the host's current API version
    pub fn new() -> Result<Self> {
        let api_version = ApiVersion::from_str(constants::API_VERSION)?;
        Ok(Self::with_api_version(api_version))
    }

    pub fn with_api_version(api_version: ApiVersion) -> Self {
        Self {
            registry: Arc::new(Mutex::new(PluginRegistry::new(api_version))),
        }
    }

    pub fn registry(&self) -> &Arc<Mutex<PluginRegistry>> {
        &self.registry
    }
}

impl Debug for DefaultReaderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultReaderManager").finish_non_exhaustive()
    }
}

#[async_trait]
impl ReaderManager for DefaultReaderManager {
    async fn register_plugin(&self, plugin: Arc<dyn ReaderPlugin>) -> Result<()> {
        self.registry.lock().await.register_plugin(plugin)
    }

    async fn get_reader(&self, path: &ReaderPath, plugin: Option<&str>) -> Result<Reader> {
        self.registry.lock().await.get_reader(path, plugin)
    }

    async fn read_data(&self, path: &ReaderPath, plugin: Option<&str>) -> Result<ReadOutcome> {
        // Lock is released before the loader runs
        let reader = self.get_reader(path, plugin).await?;
        let plugin_id = reader.plugin_id().to_string();
        debug!("Reading {} with plugin '{}'", path, plugin_id);

        let owned_path = path.clone();
        let result = tokio::task::spawn_blocking(move || reader.read(&owned_path))
            .await
            .map_err(|e| PluginSystemError::InternalError(format!("reader task failed: {}", e)))?;

        let layers = result.map_err(|source| PluginSystemError::ReaderFailed {
            plugin_id: plugin_id.clone(),
            path: path.to_string(),
            source,
        })?;

        if layers.is_empty() {
            warn!("Plugin '{}' returned no layer data for {}", plugin_id, path);
        }
        Ok(ReadOutcome { plugin_id, layers })
    }

    async fn plugin_infos(&self) -> Result<Vec<PluginInfo>> {
        Ok(self.registry.lock().await.plugin_infos())
    }

    async fn enable_plugin(&self, id: &str) -> Result<()> {
        self.registry.lock().await.enable_plugin(id)
    }

    async fn disable_plugin(&self, id: &str) -> Result<()> {
        self.registry.lock().await.disable_plugin(id)
    }

    async fn is_plugin_enabled(&self, id: &str) -> Result<bool> {
        let registry = self.registry.lock().await;
        if !registry.has_plugin(id) {
            return Err(PluginSystemError::PluginNotFound(id.to_string()));
        }
        Ok(registry.is_enabled(id))
    }

    async fn set_call_order(&self, order: Vec<String>) -> Result<()> {
        self.registry.lock().await.set_call_order(order)
    }
}
