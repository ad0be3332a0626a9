//! # Online Player Table
//!
//! The host's live table of connected players. Each entry owns the sending
//! half of the player's chat channel; the connection task on the other end
//! drains it and writes lines to the client.

use crate::context::{PlayerDirectory, ServerError};
use crate::types::{PlayerId, PlayerRef};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug)]
struct OnlinePlayer {
    player: PlayerRef,
    chat: mpsc::UnboundedSender<String>,
}

/// Lock-free table of connected players keyed by UUID.
#[derive(Debug, Default)]
pub struct OnlinePlayers {
    players: DashMap<Uuid, OnlinePlayer>,
}

impl OnlinePlayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connected player and returns the receiving end of their
    /// chat channel. Reconnecting with the same UUID replaces the old entry.
    pub fn connect(&self, id: PlayerId, name: impl Into<String>) -> (PlayerRef, mpsc::UnboundedReceiver<String>) {
        let (chat, inbox) = mpsc::unbounded_channel();
        let player = PlayerRef::new(id, name);
        debug!("👤 OnlinePlayers: {} ({}) connected", player.name, player.id);
        self.players.insert(
            id.uuid(),
            OnlinePlayer {
                player: player.clone(),
                chat,
            },
        );
        (player, inbox)
    }

    /// Removes a player, returning their handle if they were online.
    pub fn disconnect(&self, id: PlayerId) -> Option<PlayerRef> {
        self.players.remove(&id.uuid()).map(|(_, online)| {
            debug!("👤 OnlinePlayers: {} ({}) disconnected", online.player.name, online.player.id);
            online.player
        })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for OnlinePlayers {
    fn lookup_player(&self, uuid: &Uuid) -> Option<PlayerRef> {
        self.players.get(uuid).map(|entry| entry.player.clone())
    }

    fn send_message(&self, player: &PlayerRef, text: &str) -> Result<(), ServerError> {
        let Some(online) = self.players.get(&player.id.uuid()) else {
            return Err(ServerError::PlayerOffline(player.name.clone()));
        };
        online.chat.send(text.to_string()).map_err(|_| {
            warn!("👤 OnlinePlayers: chat channel for {} is closed", player.name);
            ServerError::Network(format!("chat channel for {} is closed", player.name))
        })
    }
}
