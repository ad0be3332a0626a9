//! # Capture Bridge Plugin
//!
//! Relays creature capture events from an optional creature mod to the chat of
//! the player who made the capture.
//!
//! The mod may or may not be installed. On enable the plugin probes the host's
//! [`ModLoader`](bridge_api::modding::ModLoader) for the mod's event types and,
//! only if they all resolve, subscribes a [`CaptureHandler`] to the capture
//! event. Every failure after that point is logged and contained; nothing
//! escapes into the host.
//!
//! ## Flow
//!
//! ```text
//! probe ─▶ subscribe ─▶ [mod fires capture] ─▶ extract ─▶ resolve ─▶ notify
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod extract;
pub mod handler;
pub mod notify;
pub mod probe;
pub mod resolve;
pub mod subscription;

#[cfg(test)]
mod test_support;

use async_trait::async_trait;
use bridge_api::{LogLevel, PluginError, PluginMetadata, ServerContext, SimplePlugin};
use std::sync::Arc;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use extract::CapturePayload;
pub use handler::{CaptureHandler, CaptureOutcome};
pub use probe::{ModCapability, ModSymbols};

pub const PLUGIN_NAME: &str = "CaptureBridge";
pub const PLUGIN_AUTHORS: &str = "KyotoAnimation";
pub const PLUGIN_DESCRIPTION: &str = "Sends a chat notice to players who capture a creature";

/// The capture bridge plugin.
pub struct CaptureBridgePlugin {
    config: BridgeConfig,
    symbols: ModSymbols,
    available: bool,
}

impl CaptureBridgePlugin {
    pub fn new() -> Self {
        Self::with_symbols(ModSymbols::default())
    }

    /// A plugin that probes for mod types other than the defaults.
    pub fn with_symbols(symbols: ModSymbols) -> Self {
        Self {
            config: BridgeConfig::default(),
            symbols,
            available: false,
        }
    }

    /// Whether the last enable found the mod.
    pub fn is_mod_available(&self) -> bool {
        self.available
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    fn load_config(&self, context: &dyn ServerContext) -> BridgeConfig {
        let dir = context.data_dir().join(PLUGIN_NAME);
        BridgeConfig::load_or_create(&dir).unwrap_or_else(|e| {
            context.log(
                LogLevel::Warn,
                &format!("🎣 CaptureBridge: {}, using defaults", e),
            );
            BridgeConfig::default()
        })
    }
}

impl Default for CaptureBridgePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimplePlugin for CaptureBridgePlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn metadata(&self) -> PluginMetadata<'_> {
        PluginMetadata {
            name: self.name(),
            version: self.version(),
            authors: PLUGIN_AUTHORS,
            description: PLUGIN_DESCRIPTION,
        }
    }

    async fn on_init(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        context.log(LogLevel::Info, "🎣 CaptureBridge: Enabling...");

        self.config = self.load_config(context.as_ref());

        let report = environment::detect_environment(&context.server_info(), &self.config.hybrid_host_markers);
        environment::log_environment(context.as_ref(), &report, &self.metadata());

        let capability = ModCapability::detect(context.mod_loader().as_ref(), &self.symbols);
        self.available = capability.is_available();

        if self.available {
            context.log(LogLevel::Info, "🎣 CaptureBridge: Creature mod detected");
            let handler = Arc::new(CaptureHandler::new(&context, self.config.debug_mode));
            match subscription::subscribe_capture(&capability, handler.into_mod_handler()) {
                Ok(()) => context.log(
                    LogLevel::Info,
                    &format!("🎣 CaptureBridge: Subscribed to {}", subscription::CAPTURE_EVENT_FIELD),
                ),
                Err(e) => context.log(
                    LogLevel::Error,
                    &format!("🎣 CaptureBridge: Failed to subscribe to capture events: {}", e),
                ),
            }
        } else {
            context.log(
                LogLevel::Warn,
                "🎣 CaptureBridge: Creature mod not found, capture notices are disabled",
            );
            context.log(
                LogLevel::Warn,
                "🎣 CaptureBridge: Make sure the host is a hybrid host with the creature mod installed",
            );
        }

        context.log(LogLevel::Info, "🎣 CaptureBridge: ✅ Enabled");
        context.log(
            LogLevel::Info,
            &format!(
                "🎣 CaptureBridge: Debug mode {}",
                if self.config.debug_mode { "on" } else { "off" }
            ),
        );
        Ok(())
    }

    async fn on_shutdown(&mut self, context: Arc<dyn ServerContext>) -> Result<(), PluginError> {
        context.log(LogLevel::Info, "🎣 CaptureBridge: Disabling...");
        context.log(LogLevel::Info, "🎣 CaptureBridge: Disabled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{CAPTURE_EVENT_TYPE, EVENTS_TYPE, PRIORITY_TYPE};
    use crate::subscription::{CAPTURE_EVENT_FIELD, NORMAL_PRIORITY_FIELD};
    use crate::test_support::RecordingContext;
    use bridge_api::modding::{EventChannel, ModClass, ModValue, Priority, StaticField};

    fn context_in(dir: &std::path::Path) -> Arc<RecordingContext> {
        let mut context = RecordingContext::new();
        context.data_dir = dir.to_path_buf();
        Arc::new(context)
    }

    #[tokio::test]
    async fn missing_mod_warns_and_still_enables() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_in(dir.path());
        let mut plugin = CaptureBridgePlugin::new();

        plugin.on_init(context.clone()).await.unwrap();

        assert!(!plugin.is_mod_available());
        let warnings = context.messages(LogLevel::Warn);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Creature mod not found"));
        assert!(dir.path().join(PLUGIN_NAME).join(config::CONFIG_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let plugin_dir = dir.path().join(PLUGIN_NAME);
        std::fs::create_dir_all(&plugin_dir).unwrap();
        std::fs::write(plugin_dir.join(config::CONFIG_FILE_NAME), "debug-mode = [").unwrap();
        let context = context_in(dir.path());
        let mut plugin = CaptureBridgePlugin::new();

        plugin.on_init(context.clone()).await.unwrap();

        assert_eq!(plugin.config(), &BridgeConfig::default());
        assert!(context
            .messages(LogLevel::Warn)
            .iter()
            .any(|message| message.contains("using defaults")));
    }

    #[tokio::test]
    async fn enable_logs_environment_and_debug_state() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_in(dir.path());
        let mut plugin = CaptureBridgePlugin::new();

        plugin.on_init(context.clone()).await.unwrap();
        plugin.on_shutdown(context.clone()).await.unwrap();

        let info = context.messages(LogLevel::Info);
        assert!(info.iter().any(|m| m.contains("Detected Arclight hybrid host")));
        assert!(info.iter().any(|m| m.ends_with(&format!("Version: {}", env!("CARGO_PKG_VERSION")))));
        assert!(info.iter().any(|m| m.ends_with("Debug mode off")));
        assert_eq!(info.last().map(String::as_str), Some("🎣 CaptureBridge: Disabled"));
    }

    fn register_mod(context: &RecordingContext, capture_field: StaticField) {
        context.mods.register(Arc::new(
            ModClass::new(EVENTS_TYPE).with_field(CAPTURE_EVENT_FIELD, capture_field),
        ));
        context.mods.register(Arc::new(
            ModClass::new(PRIORITY_TYPE).with_field(NORMAL_PRIORITY_FIELD, StaticField::Priority(Priority::Normal)),
        ));
        context.mods.register(Arc::new(ModClass::new(CAPTURE_EVENT_TYPE)));
    }

    #[tokio::test]
    async fn subscription_is_logged_when_the_mod_is_present() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_in(dir.path());
        let channel = Arc::new(EventChannel::new(CAPTURE_EVENT_FIELD));
        register_mod(&context, StaticField::Event(channel.clone()));
        let mut plugin = CaptureBridgePlugin::new();

        plugin.on_init(context.clone()).await.unwrap();

        assert!(plugin.is_mod_available());
        assert_eq!(channel.handler_count(), 1);
        assert!(context
            .messages(LogLevel::Info)
            .iter()
            .any(|m| m.ends_with("Subscribed to POKEMON_CAPTURED")));
        assert_eq!(context.count(LogLevel::Error), 0);
    }

    #[tokio::test]
    async fn failed_subscription_is_logged_and_enable_continues() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_in(dir.path());
        register_mod(&context, StaticField::Value(ModValue::from("not an event")));
        let mut plugin = CaptureBridgePlugin::new();

        plugin.on_init(context.clone()).await.unwrap();

        assert!(plugin.is_mod_available());
        let errors = context.messages(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Failed to subscribe"));
        assert!(context
            .messages(LogLevel::Info)
            .iter()
            .any(|m| m.ends_with("✅ Enabled")));
    }

    #[test]
    fn metadata_describes_the_plugin() {
        let plugin = CaptureBridgePlugin::default();
        let metadata = plugin.metadata();
        assert_eq!(metadata.name, "CaptureBridge");
        assert_eq!(metadata.authors, PLUGIN_AUTHORS);
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
