//! # Plugin System Interface
//!
//! This module defines the plugin interface and error types plugins use to
//! plug into the host.
//!
//! ## Plugin Lifecycle
//!
//! 1. **Creation** - Plugin instance created via `new()`
//! 2. **Initialization** - `on_init()` with the server context (the host's "enable")
//! 3. **Operation** - Normal event processing
//! 4. **Shutdown** - `on_shutdown()` (the host's "disable")
//!
//! A host that supports reloading may call `on_init()` again after
//! `on_shutdown()`; plugins must tolerate that.

use crate::context::ServerContext;
use crate::types::PluginMetadata;
use async_trait::async_trait;
use std::sync::Arc;

// ============================================================================
// Plugin Development Interfaces
// ============================================================================

/// Simplified plugin trait.
///
/// # Examples
///
/// ```rust,no_run
/// use bridge_api::*;
/// use std::sync::Arc;
///
/// struct ChatPlugin;
///
/// #[async_trait::async_trait]
/// impl SimplePlugin for ChatPlugin {
///     fn name(&self) -> &str { "chat_system" }
///     fn version(&self) -> &str { "1.0.0" }
///
///     async fn on_init(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
///         context.log(LogLevel::Info, "chat system ready");
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SimplePlugin: Send + Sync + 'static {
    /// Returns the name of this plugin.
    ///
    /// The name should be unique and stable across versions. It's used for
    /// logging, the plugin's data directory, and plugin management.
    fn name(&self) -> &str;

    /// Returns the version string of this plugin.
    fn version(&self) -> &str;

    /// Returns descriptive metadata for diagnostics.
    fn metadata(&self) -> PluginMetadata<'_> {
        PluginMetadata {
            name: self.name(),
            version: self.version(),
            authors: "",
            description: "",
        }
    }

    /// Initialize the plugin with server context.
    ///
    /// Use this for loading configuration, probing optional dependencies and
    /// subscribing to events. Failed initialization is reported by the host
    /// but never takes the host down.
    async fn on_init(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(())
    }

    /// Shutdown the plugin gracefully.
    ///
    /// Shutdown errors are logged but don't prevent unloading.
    async fn on_shutdown(&mut self, _context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during plugin operations.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Plugin initialization failed during startup
    #[error("Plugin initialization failed: {0}")]
    InitializationFailed(String),
    /// Shutdown could not release the plugin's resources
    #[error("Plugin shutdown failed: {0}")]
    ShutdownFailed(String),
}
