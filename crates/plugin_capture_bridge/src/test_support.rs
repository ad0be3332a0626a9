//! Shared fixtures for unit tests.

use bridge_api::modding::{JsonObject, ModLoader, ModRef, ModRegistry};
use bridge_api::{LogLevel, OnlinePlayers, PlayerDirectory, ServerContext, ServerInfo};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const ASH_UUID: &str = "069a79f4-44e9-4726-a5be-fca90e38aaf5";

/// Server context that records every log line.
#[derive(Debug)]
pub struct RecordingContext {
    pub logs: Mutex<Vec<(LogLevel, String)>>,
    pub players: Arc<OnlinePlayers>,
    pub mods: Arc<ModRegistry>,
    pub server_info: ServerInfo,
    pub data_dir: PathBuf,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
            players: Arc::new(OnlinePlayers::new()),
            mods: Arc::new(ModRegistry::new()),
            server_info: ServerInfo::new("Arclight", "arclight-1.20.1-1.0.5"),
            data_dir: PathBuf::from("plugins"),
        }
    }

    pub fn count(&self, level: LogLevel) -> usize {
        self.logs.lock().unwrap().iter().filter(|(l, _)| *l == level).count()
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl ServerContext for RecordingContext {
    fn log(&self, level: LogLevel, message: &str) {
        self.logs.lock().unwrap().push((level, message.to_string()));
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

pub fn native_player(value: Value) -> Value {
    let mut player = json!({ "$type": "net.minecraft.server.level.ServerPlayer" });
    if let (Some(target), Value::Object(fields)) = (player.as_object_mut(), value) {
        target.extend(fields);
    }
    player
}

pub fn capture_event(pokemon: Value, player: Value) -> ModRef {
    JsonObject::from_json(
        "com.cobblemon.mod.common.api.events.pokemon.PokemonCapturedEvent",
        json!({ "pokemon": pokemon, "player": player }),
    )
}

pub fn pikachu() -> Value {
    json!({
        "$type": "com.cobblemon.mod.common.pokemon.Pokemon",
        "species": { "name": "Pikachu" },
        "level": 12,
        "shiny": true,
        "nature": { "displayName": { "$type": "net.minecraft.network.chat.MutableComponent", "string": "Timid" } }
    })
}
