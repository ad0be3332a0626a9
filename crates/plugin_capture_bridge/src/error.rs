//! Error types for the capture bridge.

use bridge_api::modding::{AccessError, LoadError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("mod support is unavailable")]
    Unavailable,

    #[error("mod type could not be loaded: {0}")]
    Load(#[from] LoadError),

    #[error("mod access failed: {0}")]
    Access(#[from] AccessError),

    #[error("static field `{field}` on {type_name} is a {found}, expected {expected}")]
    UnexpectedField {
        type_name: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{accessor}` returned a {found}, expected {expected}")]
    UnexpectedValue {
        accessor: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("failed to read config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config {path:?}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
