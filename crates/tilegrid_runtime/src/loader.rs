//! Asset loader for `.level.json` files
//!
//! Levels saved by the editor can be loaded through the asset server. With
//! Bevy's `file_watcher` feature, saving in the editor hot-reloads the level
//! in a running game (the plugin restarts the session on change).
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tilegrid_runtime::{LevelHandle, TilegridRuntimePlugin};
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.insert_resource(LevelHandle(asset_server.load("levels/forest.level.json")));
//! }
//! ```

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use thiserror::Error;
use tilegrid_core::{LevelFile, SchemaError, Tilemap};

/// Error type for level loading failures
#[derive(Debug, Error)]
pub enum LevelLoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid level: {0}")]
    Schema(#[from] SchemaError),
}

/// Asset loader for level JSON files
///
/// The file is fully validated (cell keys, key/position agreement, at least
/// one layer) before the asset is produced, so a loaded `LevelFile` always
/// converts into a [`Tilemap`].
#[derive(Default, bevy::reflect::TypePath)]
pub struct LevelFileLoader;

impl AssetLoader for LevelFileLoader {
    type Asset = LevelFile;
    type Settings = ();
    type Error = LevelLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let file = parse_level(&bytes)?;
        Tilemap::from_level_file("", &file)?;
        Ok(file)
    }

    fn extensions(&self) -> &[&str] {
        &["level.json"]
    }
}

fn parse_level(bytes: &[u8]) -> Result<LevelFile, LevelLoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Level name from an asset path (`levels/forest.level.json` -> `forest`)
pub fn level_name_from_path(path: &std::path::Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    file_name
        .strip_suffix(tilegrid_core::LEVEL_EXTENSION)
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_level_name_from_path() {
        assert_eq!(level_name_from_path(Path::new("levels/forest.level.json")), "forest");
        assert_eq!(level_name_from_path(Path::new("plain")), "plain");
    }

    #[test]
    fn test_parse_template() {
        let json = LevelFile::default_template().to_json().unwrap();
        let file = parse_level(json.as_bytes()).unwrap();
        assert_eq!(file, LevelFile::default_template());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_level(b"{ nope"), Err(LevelLoadError::Json(_))));
    }
}
