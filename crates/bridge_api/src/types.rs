//! # Core Type Definitions
//!
//! Fundamental host-side types shared between the host and its plugins.
//!
//! ## Key Types
//!
//! - [`PlayerId`] - Unique identifier for a connected player
//! - [`PlayerRef`] - The host's handle to a connected player
//! - [`ServerInfo`] - Host version and installed plugin names
//! - [`PluginMetadata`] - Descriptive information a plugin reports about itself

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Core Types (Minimal set)
// ============================================================================

/// Unique identifier for a player on the host.
///
/// This is a wrapper around UUID that provides type safety and ensures
/// player IDs cannot be confused with other identifiers handed out by the
/// host or by mods running inside it.
///
/// # Examples
///
/// ```rust
/// use bridge_api::PlayerId;
///
/// let player_id = PlayerId::from_str("550e8400-e29b-41d4-a716-446655440000")?;
/// println!("Player ID: {}", player_id);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a player ID from a string representation.
    ///
    /// Returns `Err(uuid::Error)` if the string is not a valid UUID.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }

    /// Returns the underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for PlayerId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host's representation of a connected player.
///
/// Handed out by a [`PlayerDirectory`](crate::context::PlayerDirectory) and
/// used as the target of message delivery. Holding a `PlayerRef` does not
/// keep the player online; delivery to a player that has since left fails
/// with [`ServerError::PlayerOffline`](crate::context::ServerError::PlayerOffline).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    /// Stable player identifier
    pub id: PlayerId,
    /// Display name as known by the host
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Information about the running host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Host implementation name (e.g. "Paper", "Arclight")
    pub name: String,
    /// Full version string as reported by the host
    pub version: String,
    /// Names of every plugin installed on the host
    #[serde(default)]
    pub plugins: Vec<String>,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            plugins: Vec::new(),
        }
    }

    /// Adds an installed plugin name.
    pub fn with_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.plugins.push(plugin.into());
        self
    }
}

/// Struct representing metadata for a plugin.
///
/// This struct contains essential information about a plugin, including its name,
/// version, authors, and a description. It borrows from the plugin instance that
/// reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMetadata<'s> {
    /// The name of the plugin.
    pub name: &'s str,
    /// The version of the plugin.
    pub version: &'s str,
    /// The authors of the plugin.
    pub authors: &'s str,
    /// A description of the plugin.
    pub description: &'s str,
}
