//! Tile layers: one sparse grid plus free-floating elements each

use std::collections::HashMap;

use crate::{Cell, OffgridRecord, TileRecord};

/// A single collision/visibility plane
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Whether grid tiles on this layer produce blocking geometry
    pub collision_enabled: bool,
    pub visible: bool,
    /// Grid-aligned records, one per cell
    pub grid: HashMap<Cell, TileRecord>,
    /// Off-grid records keyed by their truncated pixel position
    pub off_grid: HashMap<Cell, OffgridRecord>,
}

impl Default for Layer {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer {
    /// Create an empty layer with collision and visibility on
    pub fn new() -> Self {
        Self {
            collision_enabled: true,
            visible: true,
            grid: HashMap::new(),
            off_grid: HashMap::new(),
        }
    }

    /// Get the record at a cell
    pub fn tile(&self, cell: Cell) -> Option<&TileRecord> {
        self.grid.get(&cell)
    }

    /// Check whether the cell holds an element of one of the given ids
    pub fn has_element_in<F>(&self, cell: Cell, is_member: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.grid
            .get(&cell)
            .is_some_and(|record| is_member(&record.element))
    }

    /// Place a record, replacing whatever occupied its cell
    pub fn insert(&mut self, cell: Cell, mut record: TileRecord) -> Option<TileRecord> {
        record.position = cell;
        self.grid.insert(cell, record)
    }

    /// Remove the record at a cell, if any
    pub fn remove(&mut self, cell: Cell) -> Option<TileRecord> {
        self.grid.remove(&cell)
    }

    /// Check if the layer holds nothing
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty() && self.off_grid.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer() {
        let layer = Layer::new();
        assert!(layer.collision_enabled);
        assert!(layer.visible);
        assert!(layer.is_empty());
    }

    #[test]
    fn test_insert_overwrites_and_fixes_position() {
        let mut layer = Layer::new();
        let cell = Cell::new(2, 3);
        layer.insert(cell, TileRecord::new("tiles", "dirt", Cell::new(9, 9)));
        let old = layer.insert(cell, TileRecord::new("tiles", "mossy_stone", cell));

        assert_eq!(old.map(|r| r.element), Some("dirt".to_string()));
        assert_eq!(layer.grid.len(), 1);
        assert_eq!(layer.tile(cell).unwrap().position, cell);
        assert_eq!(layer.tile(cell).unwrap().element, "mossy_stone");
    }
}
