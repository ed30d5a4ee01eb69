//! On-disk level store
//!
//! Levels live as `<name>.level.json` files under a single root directory.
//! Loading a name with no file yields the default template so the editor can
//! start painting a fresh level right away.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::{LevelError, LevelFile, Tilemap};

/// File suffix for stored levels
pub const LEVEL_EXTENSION: &str = ".level.json";

/// Maximum level name length, in characters
pub const MAX_NAME_LEN: usize = 20;

const INVALID_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '|', '?', '*', '/', '\\'];

/// Directory of persisted levels
#[derive(Debug, Clone)]
pub struct LevelStore {
    root: PathBuf,
}

impl LevelStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a level name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}{LEVEL_EXTENSION}"))
    }

    fn io_error(path: &Path, source: io::Error) -> LevelError {
        LevelError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Load a level; an absent file loads the default template instead
    pub fn load(&self, name: &str) -> Result<Tilemap, LevelError> {
        let path = self.path_for(name);
        let file = match fs::read(&path) {
            Ok(bytes) => LevelFile::from_slice(&bytes).map_err(|source| LevelError::Schema {
                name: name.to_string(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => LevelFile::default_template(),
            Err(e) => return Err(Self::io_error(&path, e)),
        };
        Tilemap::from_level_file(name, &file).map_err(|source| LevelError::Schema {
            name: name.to_string(),
            source,
        })
    }

    /// Write a tilemap under its own name
    pub fn save(&self, map: &Tilemap) -> Result<PathBuf, LevelError> {
        let path = self.path_for(&map.name);
        let json = map
            .to_level_file()
            .to_json()
            .map_err(|source| LevelError::Schema {
                name: map.name.clone(),
                source,
            })?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(&self.root, e))?;
        fs::write(&path, json).map_err(|e| Self::io_error(&path, e))?;
        Ok(path)
    }

    /// Names of every stored level, sorted. A missing root lists nothing.
    pub fn list(&self) -> Result<Vec<String>, LevelError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&self.root, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Self::io_error(&self.root, e))?;
            let file_name = entry.file_name();
            if let Some(name) = file_name
                .to_str()
                .and_then(|n| n.strip_suffix(LEVEL_EXTENSION))
            {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Create a new level from the default template
    pub fn create(&self, name: &str) -> Result<Tilemap, LevelError> {
        validate_name(name)?;
        if self.path_for(name).exists() {
            return Err(LevelError::AlreadyExists(name.to_string()));
        }
        let map = Tilemap::from_level_file(name, &LevelFile::default_template()).map_err(
            |source| LevelError::Schema {
                name: name.to_string(),
                source,
            },
        )?;
        self.save(&map)?;
        Ok(map)
    }
}

/// Check a level name against the store's naming rules
pub fn validate_name(name: &str) -> Result<(), LevelError> {
    let invalid = |reason: String| LevelError::InvalidName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Err(invalid("name is empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid(format!("longer than {MAX_NAME_LEN} characters")));
    }
    if let Some(c) = name.chars().find(|c| INVALID_NAME_CHARS.contains(c)) {
        return Err(invalid(format!("invalid character '{c}'")));
    }
    Ok(())
}
