//! # In-Process Host
//!
//! A minimal host built from the pieces in this crate: a [`BasicServerContext`]
//! handing out the online player table and the mod registry, and a
//! [`PluginHost`] driving plugin enable/disable.

use crate::context::{LogLevel, PlayerDirectory, ServerContext};
use crate::modding::{ModLoader, ModRegistry};
use crate::players::OnlinePlayers;
use crate::plugin::SimplePlugin;
use crate::types::ServerInfo;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Basic server context backed by in-process collaborators.
///
/// Plugin log lines are forwarded to `tracing` with the `plugin` target.
#[derive(Debug, Clone)]
pub struct BasicServerContext {
    players: Arc<OnlinePlayers>,
    mods: Arc<ModRegistry>,
    server_info: ServerInfo,
    data_dir: PathBuf,
}

impl BasicServerContext {
    /// Creates a context with no players online and no mods installed.
    pub fn new(data_dir: impl Into<PathBuf>, server_info: ServerInfo) -> Self {
        Self {
            players: Arc::new(OnlinePlayers::new()),
            mods: Arc::new(ModRegistry::new()),
            server_info,
            data_dir: data_dir.into(),
        }
    }

    /// Replaces the mod registry, e.g. one already populated by a mod.
    pub fn with_mods(mut self, mods: Arc<ModRegistry>) -> Self {
        self.mods = mods;
        self
    }

    /// Concrete handle to the online player table.
    pub fn online_players(&self) -> Arc<OnlinePlayers> {
        Arc::clone(&self.players)
    }

    /// Concrete handle to the mod registry.
    pub fn mods(&self) -> Arc<ModRegistry> {
        Arc::clone(&self.mods)
    }
}

impl ServerContext for BasicServerContext {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => error!(target: "plugin", "{}", message),
            LogLevel::Warn => warn!(target: "plugin", "{}", message),
            LogLevel::Info => info!(target: "plugin", "{}", message),
            LogLevel::Debug => debug!(target: "plugin", "{}", message),
            LogLevel::Trace => trace!(target: "plugin", "{}", message),
        }
    }

    fn players(&self) -> Arc<dyn PlayerDirectory> {
        self.players.clone()
    }

    fn server_info(&self) -> ServerInfo {
        self.server_info.clone()
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn mod_loader(&self) -> Arc<dyn ModLoader> {
        self.mods.clone()
    }
}

/// Drives the enable/disable lifecycle of a set of plugins.
///
/// A plugin that fails to enable or disable is logged and skipped; one
/// plugin's failure never stops the others.
pub struct PluginHost {
    context: Arc<dyn ServerContext>,
    plugins: Vec<Box<dyn SimplePlugin>>,
}

impl PluginHost {
    pub fn new(context: Arc<dyn ServerContext>) -> Self {
        Self {
            context,
            plugins: Vec::new(),
        }
    }

    pub fn add_plugin(&mut self, plugin: Box<dyn SimplePlugin>) {
        self.plugins.push(plugin);
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Enables every plugin in registration order. Returns how many
    /// enabled successfully.
    pub async fn enable_all(&mut self) -> usize {
        let mut enabled = 0;
        for plugin in self.plugins.iter_mut() {
            info!("🔌 Enabling plugin {} v{}", plugin.name(), plugin.version());
            match plugin.on_init(Arc::clone(&self.context)).await {
                Ok(()) => enabled += 1,
                Err(e) => error!("🔌 Failed to enable plugin {}: {}", plugin.name(), e),
            }
        }
        enabled
    }

    /// Disables every plugin in reverse registration order.
    pub async fn disable_all(&mut self) {
        for plugin in self.plugins.iter_mut().rev() {
            info!("🔌 Disabling plugin {}", plugin.name());
            if let Err(e) = plugin.on_shutdown(Arc::clone(&self.context)).await {
                error!("🔌 Failed to disable plugin {}: {}", plugin.name(), e);
            }
        }
    }
}
