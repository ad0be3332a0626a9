//! Per-event capture handling: extract, resolve, notify.

use crate::extract::{extract_capture, CapturePayload};
use crate::notify::deliver;
use crate::resolve::{resolve_host_player, resolve_player_name};
use bridge_api::modding::{ModHandler, ModObject, ModRef};
use bridge_api::{LogLevel, PlayerRef, ServerContext};
use std::sync::{Arc, Weak};

/// What happened to one capture event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The notice reached the player
    Notified { player: PlayerRef, messages: usize },
    /// The native player could not be matched to an online host player
    Unresolved,
    /// The event carried no creature
    Skipped,
    /// Extraction or delivery failed
    Failed,
    /// The host that enabled the plugin has been dropped
    Detached,
}

/// Handles capture events for the plugin. One instance is built per enable
/// and shared with the mod's event bus.
///
/// The context is held weakly: the host's mod registry owns the event bus,
/// which owns this handler, so a strong reference would keep the host alive.
#[derive(Debug)]
pub struct CaptureHandler {
    context: Weak<dyn ServerContext>,
    debug_mode: bool,
}

impl CaptureHandler {
    pub fn new(context: &Arc<dyn ServerContext>, debug_mode: bool) -> Self {
        Self {
            context: Arc::downgrade(context),
            debug_mode,
        }
    }

    pub fn handle(&self, event: &dyn ModObject) -> CaptureOutcome {
        match self.context.upgrade() {
            Some(context) => self.handle_in(context.as_ref(), event),
            None => CaptureOutcome::Detached,
        }
    }

    fn handle_in(&self, context: &dyn ServerContext, event: &dyn ModObject) -> CaptureOutcome {
        let capture = match extract_capture(event, context) {
            Ok(Some(capture)) => capture,
            Ok(None) => return CaptureOutcome::Skipped,
            Err(e) => {
                context.log(
                    LogLevel::Error,
                    &format!("🎣 CaptureBridge: Failed to read capture event: {}", e),
                );
                return CaptureOutcome::Failed;
            }
        };

        let directory = context.players();
        let native = capture.native_player.as_ref();
        let host_player = resolve_host_player(native, directory.as_ref());

        if self.debug_mode {
            let name = resolve_player_name(native, directory.as_ref());
            log_summary(context, &name, &capture.payload);
            if host_player.is_none() {
                context.log(
                    LogLevel::Debug,
                    &format!("🎣 CaptureBridge: {} is not an online player, notice skipped", name),
                );
            }
        }

        let Some(player) = host_player else {
            return CaptureOutcome::Unresolved;
        };

        match deliver(directory.as_ref(), &player, &capture.payload) {
            Ok(messages) => CaptureOutcome::Notified { player, messages },
            Err(e) => {
                context.log(
                    LogLevel::Warn,
                    &format!("🎣 CaptureBridge: Failed to notify {}: {}", player.name, e),
                );
                CaptureOutcome::Failed
            }
        }
    }

    /// Wraps the handler into a callback for the mod's event bus.
    ///
    /// Once the host context is gone the callback ignores further events.
    pub fn into_mod_handler(self: Arc<Self>) -> ModHandler {
        Arc::new(move |event: ModRef| {
            self.handle(event.as_ref());
        })
    }
}

fn log_summary(context: &dyn ServerContext, name: &str, payload: &CapturePayload) {
    context.log(
        LogLevel::Info,
        &format!(
            "🎣 CaptureBridge: {} captured {} (level {}, shiny: {})",
            name, payload.species_name, payload.level, payload.is_shiny
        ),
    );
}
