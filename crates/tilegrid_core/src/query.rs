//! Read-only spatial queries over a tilemap
//!
//! These are the only source of collision geometry and trigger hits for the
//! runtime. Positions are continuous pixel coordinates; anything outside the
//! populated grid simply yields empty results.

use crate::{Cell, ElementRules, LevelEnd, PixelRect, TileRecord, Tilemap};

/// A tile found near a query point
#[derive(Debug, Clone, Copy)]
pub struct TileHit<'a> {
    pub record: &'a TileRecord,
    pub layer: usize,
    /// The owning layer's collision flag
    pub collision_enabled: bool,
}

/// Blocking geometry for one physical tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsRect<'a> {
    pub rect: PixelRect,
    pub element: &'a str,
}

/// Borrowed query context: the tilemap, its classification rules and tile size
#[derive(Debug, Clone, Copy)]
pub struct SpatialQuery<'a> {
    map: &'a Tilemap,
    rules: &'a ElementRules,
    tile_size: i32,
}

impl<'a> SpatialQuery<'a> {
    pub fn new(map: &'a Tilemap, rules: &'a ElementRules, tile_size: i32) -> Self {
        Self {
            map,
            rules,
            tile_size,
        }
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn rules(&self) -> &'a ElementRules {
        self.rules
    }

    pub fn tilemap(&self) -> &'a Tilemap {
        self.map
    }

    /// Every tile in the 3x3 neighborhood of the cell containing `pos`,
    /// across all layers.
    pub fn tiles_around(&self, pos: [f32; 2]) -> Vec<TileHit<'a>> {
        let center = Cell::from_pixel(pos, self.tile_size);
        let mut hits = Vec::new();
        for cell in center.neighborhood() {
            for (index, layer) in self.map.layers.iter().enumerate() {
                if let Some(record) = layer.grid.get(&cell) {
                    hits.push(TileHit {
                        record,
                        layer: index,
                        collision_enabled: layer.collision_enabled,
                    });
                }
            }
        }
        hits
    }

    /// Tile-sized rectangles for physical tiles near `pos` on layers with
    /// collision enabled.
    pub fn physics_rects_around(&self, pos: [f32; 2]) -> Vec<PhysicsRect<'a>> {
        self.tiles_around(pos)
            .into_iter()
            .filter(|hit| hit.collision_enabled && self.rules.is_physical(&hit.record.element))
            .map(|hit| PhysicsRect {
                rect: self.cell_rect(hit.record.position),
                element: hit.record.element.as_str(),
            })
            .collect()
    }

    /// Whether the cell containing `pos` holds a physical tile on any layer.
    ///
    /// Unlike [`physics_rects_around`](Self::physics_rects_around), this ignores
    /// layer collision flags.
    pub fn solid_check(&self, pos: [f32; 2]) -> bool {
        let cell = Cell::from_pixel(pos, self.tile_size);
        self.map
            .layers
            .iter()
            .any(|layer| layer.has_element_in(cell, |id| self.rules.is_physical(id)))
    }

    /// The level end triggered by the cell containing `pos`, if any.
    ///
    /// Layers are scanned in order; the first lethal or goal tile wins.
    pub fn trigger_check(&self, pos: [f32; 2]) -> Option<LevelEnd> {
        let cell = Cell::from_pixel(pos, self.tile_size);
        self.map
            .layers
            .iter()
            .filter_map(|layer| layer.tile(cell))
            .find_map(|record| self.rules.trigger_kind(&record.element))
    }

    /// Pixel rectangle covered by a cell
    pub fn cell_rect(&self, cell: Cell) -> PixelRect {
        PixelRect::new(
            cell.x.saturating_mul(self.tile_size),
            cell.y.saturating_mul(self.tile_size),
            self.tile_size,
            self.tile_size,
        )
    }
}
