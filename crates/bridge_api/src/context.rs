//! # Server Context Interface
//!
//! This module defines the server context interface that provides plugins with
//! access to core host services. The context is the only bridge between plugin
//! code and the host infrastructure.
//!
//! ## Core Services
//!
//! The [`ServerContext`] provides access to:
//! - **Logging** - Messages routed into the host's log sinks
//! - **Player Directory** - Live player lookup by UUID and message delivery
//! - **Server Information** - Host version and installed plugins
//! - **Data Directory** - Where plugins keep their configuration files
//! - **Mod Loader** - Type lookup into mods running inside the same process
//!
//! ## Thread Safety
//!
//! All context operations are thread-safe. Mods fire their events on whatever
//! thread they choose, so every handle returned here is `Send + Sync`.

use crate::modding::ModLoader;
use crate::types::{PlayerRef, ServerInfo};
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Server Context Interface (Minimal)
// ============================================================================

/// Server context interface providing access to core host services.
///
/// # Examples
///
/// ```rust,no_run
/// use bridge_api::{LogLevel, PluginError, ServerContext};
/// use std::sync::Arc;
///
/// fn example_plugin_init(context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
///     context.log(LogLevel::Info, "Capture plugin initialized");
///
///     let online = context.players();
///     let info = context.server_info();
///     context.log(LogLevel::Debug, &format!("running on {}", info.version));
///     let _ = online;
///     Ok(())
/// }
/// ```
pub trait ServerContext: Send + Sync + Debug {
    /// Logs a message with the specified level.
    ///
    /// This integrates with the host's logging system and should be used
    /// for all plugin logging to ensure consistent log formatting and routing.
    fn log(&self, level: LogLevel, message: &str);

    /// Returns the host's live player directory.
    fn players(&self) -> Arc<dyn PlayerDirectory>;

    /// Returns version information about the running host.
    fn server_info(&self) -> ServerInfo;

    /// Returns the root directory under which plugins keep their data.
    ///
    /// Each plugin is expected to use a subdirectory named after itself.
    fn data_dir(&self) -> PathBuf;

    /// Returns the loader used to look up types exported by mods.
    ///
    /// Hosts that cannot run mods return a loader that reports every type as
    /// not found.
    fn mod_loader(&self) -> Arc<dyn ModLoader>;
}

/// The host's table of currently connected players.
///
/// Lookups only ever return players that are online at the time of the call.
pub trait PlayerDirectory: Send + Sync + Debug {
    /// Looks up a connected player by UUID.
    fn lookup_player(&self, uuid: &Uuid) -> Option<PlayerRef>;

    /// Delivers one chat line to a player.
    ///
    /// Returns `Err(ServerError::PlayerOffline)` if the player has left since
    /// the reference was obtained.
    fn send_message(&self, player: &PlayerRef, text: &str) -> Result<(), ServerError>;
}

// ============================================================================
// Supporting Types
// ============================================================================

/// Enumeration of log levels for structured logging.
///
/// # Level Guidelines
///
/// - **Error**: Failures that disable a feature or drop an event
/// - **Warn**: Recoverable problems and missing optional dependencies
/// - **Info**: Plugin lifecycle and, in debug mode, per-event summaries
/// - **Debug**: Detailed debugging information
/// - **Trace**: Very detailed execution traces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Critical errors that may affect system stability
    Error,
    /// Warning conditions that should be investigated
    Warn,
    /// General informational messages
    Info,
    /// Detailed information for debugging
    Debug,
    /// Very detailed trace information
    Trace,
}

/// Errors that can occur during host operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The target player is no longer connected
    #[error("Player {0} is not online")]
    PlayerOffline(String),
    /// Network-related error (connection issues, send failures, etc.)
    #[error("Network error: {0}")]
    Network(String),
}
