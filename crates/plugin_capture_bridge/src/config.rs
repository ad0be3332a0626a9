//! Plugin configuration loaded from `config.toml` in the plugin's data directory.

use crate::error::BridgeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Written on first enable so operators have something to edit.
pub const DEFAULT_CONFIG: &str = r#"# CaptureBridge configuration

# Log a summary line for every processed capture event, and note events whose
# player could not be matched to an online player.
debug-mode = false

# A host whose version string or installed plugin list contains one of these
# markers (case-insensitive) is treated as a hybrid host able to load mods.
hybrid-host-markers = ["Arclight"]
"#;

fn default_hybrid_host_markers() -> Vec<String> {
    vec!["Arclight".to_string()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BridgeConfig {
    /// Verbose per-event diagnostics
    #[serde(default)]
    pub debug_mode: bool,
    /// Markers identifying a mod-capable hybrid host
    #[serde(default = "default_hybrid_host_markers")]
    pub hybrid_host_markers: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            hybrid_host_markers: default_hybrid_host_markers(),
        }
    }
}

impl BridgeConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        let text = fs::read_to_string(path).map_err(|source| BridgeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the config in `dir`, first writing [`DEFAULT_CONFIG`] there if
    /// no config file exists yet. An existing file is never overwritten.
    pub fn load_or_create(dir: &Path) -> Result<Self, BridgeError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            fs::create_dir_all(dir)
                .and_then(|_| fs::write(&path, DEFAULT_CONFIG))
                .map_err(|source| BridgeError::ConfigWrite {
                    path: path.clone(),
                    source,
                })?;
            info!("🎣 CaptureBridge: wrote default config to {}", path.display());
        }
        Self::load(&path)
    }
}
