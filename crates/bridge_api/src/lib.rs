//! # Bridge API
//!
//! Capability surfaces shared by a game-server host, the plugins it runs and
//! the mods loaded alongside them in the same process.
//!
//! ## Architecture Overview
//!
//! - **Host side** ([`context`], [`plugin`], [`types`]): the [`ServerContext`]
//!   a plugin receives on enable, the [`SimplePlugin`] lifecycle, and the
//!   [`PlayerDirectory`] used to look players up and message them.
//! - **Mod side** ([`modding`]): optional mods are reached only through
//!   [`modding::ModLoader`] and the loosely typed [`modding::ModObject`]
//!   accessor boundary, so a plugin builds and runs whether or not a given
//!   mod is installed.
//! - **In-process host** ([`host`], [`players`], [`logging`]): a small host
//!   assembled from the pieces above.
//!
//! ## Quick Start Example
//!
//! ```rust,no_run
//! use bridge_api::*;
//! use bridge_api::modding::{EventChannel, JsonObject, ModClass, ModRegistry, Priority, StaticField};
//! use std::sync::Arc;
//!
//! let captured = Arc::new(EventChannel::new("POKEMON_CAPTURED"));
//! let mods = Arc::new(ModRegistry::new());
//! mods.register(Arc::new(
//!     ModClass::new("mod.api.Events").with_field("POKEMON_CAPTURED", StaticField::Event(captured.clone())),
//! ));
//!
//! let context = BasicServerContext::new("plugins", ServerInfo::new("Arclight", "1.20.1"))
//!     .with_mods(mods);
//! context.log(LogLevel::Info, "host ready");
//!
//! captured.emit(JsonObject::from_json("PokemonCapturedEvent", serde_json::json!({ "pokemon": null })));
//! ```

pub mod context;
pub mod host;
pub mod logging;
pub mod modding;
pub mod players;
pub mod plugin;
pub mod types;

pub use context::{LogLevel, PlayerDirectory, ServerContext, ServerError};
pub use host::{BasicServerContext, PluginHost};
pub use logging::{setup_logging, LoggingSettings};
pub use players::OnlinePlayers;
pub use plugin::{PluginError, SimplePlugin};
pub use types::*;

// External dependencies that plugins commonly need
pub use async_trait::async_trait;
pub use uuid::Uuid;
