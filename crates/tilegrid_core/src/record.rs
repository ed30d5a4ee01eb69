//! Placed element records

use serde::{Deserialize, Serialize};

use crate::Cell;

/// A grid-aligned placed element.
///
/// `variant` is derived: the autotile resolver overwrites it from the
/// neighborhood, so it is not authoritative for auto-variant elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub category: String,
    pub element: String,
    pub variant: u32,
    pub position: Cell,
}

impl TileRecord {
    /// New record with the default variant
    pub fn new(category: impl Into<String>, element: impl Into<String>, position: Cell) -> Self {
        Self {
            category: category.into(),
            element: element.into(),
            variant: 0,
            position,
        }
    }

    /// Set the variant
    pub fn with_variant(mut self, variant: u32) -> Self {
        self.variant = variant;
        self
    }
}

/// A freely positioned element, in continuous pixel space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffgridRecord {
    pub category: String,
    pub element: String,
    pub variant: u32,
    pub position: [f32; 2],
}

impl OffgridRecord {
    pub fn new(category: impl Into<String>, element: impl Into<String>, position: [f32; 2]) -> Self {
        Self {
            category: category.into(),
            element: element.into(),
            variant: 0,
            position,
        }
    }

    /// Storage key: the position truncated to whole pixels
    pub fn key(&self) -> Cell {
        Cell::new(self.position[0] as i32, self.position[1] as i32)
    }
}
