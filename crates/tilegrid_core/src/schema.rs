//! Persisted level format
//!
//! ```json
//! {
//!   "layer_list": [ { "collision": true, "visible": true,
//!                     "grid": { "X;Y": { "world_element_type": "...", "element": "...",
//!                                        "variance": 0, "pos": [x, y] } },
//!                     "off_grid": { ... } } ],
//!   "background_list": [],
//!   "borders": { "top": 0, "bottom": 16, "left": 0, "right": 32 }
//! }
//! ```
//!
//! Decoding is all-or-nothing: the first bad key or missing field fails the
//! whole level.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::{BorderRegion, Cell, Layer, OffgridRecord, SchemaError, TileRecord, Tilemap};

/// Top-level level document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::asset::Asset, bevy::reflect::TypePath))]
pub struct LevelFile {
    pub layer_list: Vec<LayerFile>,
    pub background_list: Vec<serde_json::Value>,
    pub borders: BorderRegion,
}

/// One serialized layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerFile {
    pub collision: bool,
    pub visible: bool,
    pub grid: BTreeMap<String, GridRecordFile>,
    pub off_grid: BTreeMap<String, OffgridRecordFile>,
}

/// One serialized grid record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRecordFile {
    pub world_element_type: String,
    pub element: String,
    pub variance: u32,
    pub pos: [i32; 2],
}

/// One serialized off-grid record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffgridRecordFile {
    pub world_element_type: String,
    pub element: String,
    pub variance: u32,
    pub pos: [f32; 2],
}

impl LevelFile {
    /// The level used when a named level does not exist yet: a spawn marker
    /// standing on a single ground tile.
    pub fn default_template() -> Self {
        let mut grid = BTreeMap::new();
        grid.insert(
            "16;8".to_string(),
            GridRecordFile {
                world_element_type: "utils".to_string(),
                element: "player_spawner".to_string(),
                variance: 0,
                pos: [16, 8],
            },
        );
        grid.insert(
            "16;9".to_string(),
            GridRecordFile {
                world_element_type: "tiles".to_string(),
                element: "mossy_stone".to_string(),
                variance: 0,
                pos: [16, 9],
            },
        );
        Self {
            layer_list: vec![LayerFile {
                collision: true,
                visible: true,
                grid,
                off_grid: BTreeMap::new(),
            }],
            background_list: Vec::new(),
            borders: BorderRegion::new(0, 16, 0, 32),
        }
    }

    /// Parse a level document
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a level document from bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SchemaError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Serialize as JSON
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn layer_from_file(index: usize, file: &LayerFile) -> Result<Layer, SchemaError> {
    let mut grid = HashMap::with_capacity(file.grid.len());
    for (key, rec) in &file.grid {
        let cell: Cell = key.parse()?;
        if cell != Cell::from(rec.pos) {
            return Err(SchemaError::KeyMismatch {
                layer: index,
                key: key.clone(),
                x: rec.pos[0],
                y: rec.pos[1],
            });
        }
        grid.insert(
            cell,
            TileRecord {
                category: rec.world_element_type.clone(),
                element: rec.element.clone(),
                variant: rec.variance,
                position: cell,
            },
        );
    }

    let mut off_grid = HashMap::with_capacity(file.off_grid.len());
    for (key, rec) in &file.off_grid {
        let cell: Cell = key.parse()?;
        off_grid.insert(
            cell,
            OffgridRecord {
                category: rec.world_element_type.clone(),
                element: rec.element.clone(),
                variant: rec.variance,
                position: rec.pos,
            },
        );
    }

    Ok(Layer {
        collision_enabled: file.collision,
        visible: file.visible,
        grid,
        off_grid,
    })
}

fn layer_to_file(layer: &Layer) -> LayerFile {
    LayerFile {
        collision: layer.collision_enabled,
        visible: layer.visible,
        grid: layer
            .grid
            .iter()
            .map(|(cell, rec)| {
                (
                    cell.to_string(),
                    GridRecordFile {
                        world_element_type: rec.category.clone(),
                        element: rec.element.clone(),
                        variance: rec.variant,
                        pos: (*cell).into(),
                    },
                )
            })
            .collect(),
        off_grid: layer
            .off_grid
            .iter()
            .map(|(cell, rec)| {
                (
                    cell.to_string(),
                    OffgridRecordFile {
                        world_element_type: rec.category.clone(),
                        element: rec.element.clone(),
                        variance: rec.variant,
                        pos: rec.position,
                    },
                )
            })
            .collect(),
    }
}

impl Tilemap {
    /// Build a tilemap from a decoded level document
    pub fn from_level_file(name: impl Into<String>, file: &LevelFile) -> Result<Self, SchemaError> {
        if file.layer_list.is_empty() {
            return Err(SchemaError::NoLayers);
        }
        let layers = file
            .layer_list
            .iter()
            .enumerate()
            .map(|(index, layer)| layer_from_file(index, layer))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layers,
            background_list: file.background_list.clone(),
            border: file.borders,
        })
    }

    /// Parse a tilemap straight from level JSON
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self, SchemaError> {
        Self::from_level_file(name, &LevelFile::from_json(json)?)
    }

    /// Encode this tilemap as a level document
    pub fn to_level_file(&self) -> LevelFile {
        LevelFile {
            layer_list: self.layers.iter().map(layer_to_file).collect(),
            background_list: self.background_list.clone(),
            borders: self.border,
        }
    }
}
