//! Apply the variant table to tilemap layers
//!
//! A tile's neighbors count as connected when they sit on the same layer and
//! are auto-variant elements themselves (any auto-variant id, so dirt and
//! castle stone join up). Updates are computed from a snapshot and applied
//! afterwards, so the result never depends on iteration order.

use std::collections::{BTreeMap, BTreeSet};

use tilegrid_core::{Cell, ElementRules, Layer, MapError, Tilemap};

use crate::neighbors::calculate_bitmask;
use crate::variant::variant_for_mask;

/// The variant an auto-variant tile at `cell` should have, or `None` if the
/// cell holds no auto-variant tile.
pub fn variant_at(layer: &Layer, cell: Cell, rules: &ElementRules) -> Option<u32> {
    let record = layer.tile(cell)?;
    if !rules.is_auto_variant(&record.element) {
        return None;
    }
    let mask = calculate_bitmask(cell, |n| {
        layer.has_element_in(n, |id| rules.is_auto_variant(id))
    });
    Some(variant_for_mask(mask))
}

fn apply<I>(layer: &mut Layer, cells: I, rules: &ElementRules) -> usize
where
    I: IntoIterator<Item = Cell>,
{
    let updates: Vec<(Cell, u32)> = cells
        .into_iter()
        .filter_map(|cell| {
            let variant = variant_at(layer, cell, rules)?;
            let current = layer.tile(cell)?.variant;
            (current != variant).then_some((cell, variant))
        })
        .collect();

    let changed = updates.len();
    for (cell, variant) in updates {
        if let Some(record) = layer.grid.get_mut(&cell) {
            record.variant = variant;
        }
    }
    changed
}

/// Recompute every auto-variant tile on a layer. Returns how many changed.
pub fn resolve_layer(
    map: &mut Tilemap,
    layer: usize,
    rules: &ElementRules,
) -> Result<usize, MapError> {
    let layer = map.layer_mut(layer)?;
    let cells: Vec<Cell> = layer.grid.keys().copied().collect();
    Ok(apply(layer, cells, rules))
}

/// Recompute every layer of a tilemap
pub fn resolve_all(map: &mut Tilemap, rules: &ElementRules) -> usize {
    map.layers
        .iter_mut()
        .map(|layer| {
            let cells: Vec<Cell> = layer.grid.keys().copied().collect();
            apply(layer, cells, rules)
        })
        .sum()
}

/// Recompute the given cells and their 8 neighbors on one layer
pub fn resolve_cells<I>(
    map: &mut Tilemap,
    layer: usize,
    cells: I,
    rules: &ElementRules,
) -> Result<usize, MapError>
where
    I: IntoIterator<Item = Cell>,
{
    let layer = map.layer_mut(layer)?;
    let touched: BTreeSet<Cell> = cells
        .into_iter()
        .flat_map(|cell| cell.neighborhood())
        .collect();
    Ok(apply(layer, touched, rules))
}

/// Cells edited since the last flush, grouped by layer
#[derive(Debug, Clone, Default)]
pub struct DirtyCells {
    cells: BTreeMap<usize, BTreeSet<Cell>>,
}

impl DirtyCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edit at `cell` on `layer`
    pub fn mark(&mut self, layer: usize, cell: Cell) {
        self.cells.entry(layer).or_default().insert(cell);
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of marked (layer, cell) pairs
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeSet::len).sum()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Resolve every marked cell and forget them.
    ///
    /// The set is drained even when a layer index turns out to be stale.
    pub fn flush(&mut self, map: &mut Tilemap, rules: &ElementRules) -> Result<usize, MapError> {
        let pending = std::mem::take(&mut self.cells);
        let mut changed = 0;
        for (layer, cells) in pending {
            changed += resolve_cells(map, layer, cells, rules)?;
        }
        Ok(changed)
    }
}
