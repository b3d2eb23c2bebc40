use std::sync::Arc;

use log::{info, warn};

use crate::config::IrisConfig;
use crate::kernel::constants;
use crate::kernel::error::Result;
use crate::plugin_system::manager::{DefaultReaderManager, ReaderManager};
use crate::plugin_system::traits::ReaderPlugin;
use crate::viewer::{OpenOptions, Viewer};

/// Ties together configuration, the reader manager and the viewer
pub struct Application {
    config: IrisConfig,
    reader_manager: Arc<DefaultReaderManager>,
    viewer: Viewer,
}

impl Application {
    /// Create an application with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(IrisConfig::default())
    }

    pub fn with_config(config: IrisConfig) -> Result<Self> {
        info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);
        let reader_manager = Arc::new(DefaultReaderManager::new()?);
        let viewer = Viewer::new(reader_manager.clone());
        Ok(Self {
            config,
            reader_manager,
            viewer,
        })
    }

    pub fn config(&self) -> &IrisConfig {
        &self.config
    }

    pub fn reader_manager(&self) -> Arc<DefaultReaderManager> {
        self.reader_manager.clone()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.viewer
    }

    /// Statically register a reader plugin
    pub async fn register_plugin(&self, plugin: Arc<dyn ReaderPlugin>) -> Result<()> {
        self.reader_manager.register_plugin(plugin).await?;
        Ok(())
    }

    /// Apply `plugins.disabled` and `plugins.call_order` from the config.
    ///
    /// Call after every plugin is registered. Unknown names in `disabled`
    /// are skipped with a warning; unknown names in `call_order` are an error.
    pub async fn apply_plugin_settings(&self) -> Result<()> {
        let settings = &self.config.plugins;
        for name in &settings.disabled {
            if let Err(e) = self.reader_manager.disable_plugin(name).await {
                warn!("Ignoring disabled plugin '{}' from config: {}", name, e);
            }
        }
        if !settings.call_order.is_empty() {
            self.reader_manager
                .set_call_order(settings.call_order.clone())
                .await?;
        }
        Ok(())
    }

    /// Open options seeded from the `viewer` config section
    pub fn default_open_options(&self) -> OpenOptions {
        OpenOptions {
            plugin: None,
            stack: self.config.viewer.stack,
        }
    }
}
