//! Error types for grid mutation, schema decoding and the level store

use std::path::PathBuf;
use thiserror::Error;

/// Errors from layer-indexed grid operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("Layer index {index} out of range (tilemap has {len} layers)")]
    LayerIndex { index: usize, len: usize },
}

/// Errors decoding the persisted level schema. Nothing is loaded on error.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse level JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid cell key '{0}' (expected \"X;Y\")")]
    InvalidKey(String),
    #[error("Layer {layer}: key '{key}' does not match record position [{x}, {y}]")]
    KeyMismatch {
        layer: usize,
        key: String,
        x: i32,
        y: i32,
    },
    #[error("Level has no layers")]
    NoLayers,
}

/// Errors from the on-disk level store
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Level '{name}' is malformed: {source}")]
    Schema {
        name: String,
        #[source]
        source: SchemaError,
    },
    #[error("Invalid level name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
    #[error("Level '{0}' already exists")]
    AlreadyExists(String),
}
