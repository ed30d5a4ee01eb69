//! The layered tilemap and its mutation operations

use uuid::Uuid;

use crate::{
    BorderRegion, Cell, ElementRules, Layer, MapError, OffgridRecord, PixelRect, SpatialQuery,
    TileRecord,
};

/// Supplies the rendered size of an off-grid element.
///
/// Off-grid hit tests depend on the drawn image, which only the renderer
/// knows. Returning `None` makes the element unhittable.
pub trait ElementExtents {
    fn size_of(&self, record: &OffgridRecord) -> Option<[f32; 2]>;
}

impl<F> ElementExtents for F
where
    F: Fn(&OffgridRecord) -> Option<[f32; 2]>,
{
    fn size_of(&self, record: &OffgridRecord) -> Option<[f32; 2]> {
        self(record)
    }
}

/// A complete level: ordered layers plus the border region.
///
/// Layer 0 is the base layer and can never be removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Tilemap {
    pub id: Uuid,
    pub name: String,
    pub layers: Vec<Layer>,
    /// Reserved by the level format, carried through untouched
    pub background_list: Vec<serde_json::Value>,
    pub border: BorderRegion,
}

impl Tilemap {
    /// Create a tilemap with a single empty base layer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            layers: vec![Layer::new()],
            background_list: Vec::new(),
            border: BorderRegion::default(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), MapError> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(MapError::LayerIndex {
                index,
                len: self.layers.len(),
            })
        }
    }

    /// Get a layer by index
    pub fn layer(&self, index: usize) -> Result<&Layer, MapError> {
        self.check_index(index)?;
        Ok(&self.layers[index])
    }

    /// Get a mutable layer by index
    pub fn layer_mut(&mut self, index: usize) -> Result<&mut Layer, MapError> {
        self.check_index(index)?;
        Ok(&mut self.layers[index])
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Place a tile, overwriting any tile already at `cell` on that layer.
    ///
    /// The record's position is forced to `cell`.
    pub fn place_tile(
        &mut self,
        layer: usize,
        cell: Cell,
        record: TileRecord,
    ) -> Result<Option<TileRecord>, MapError> {
        Ok(self.layer_mut(layer)?.insert(cell, record))
    }

    /// Remove the tile at `cell`. Removing an empty cell is a no-op.
    pub fn remove_tile(&mut self, layer: usize, cell: Cell) -> Result<Option<TileRecord>, MapError> {
        Ok(self.layer_mut(layer)?.remove(cell))
    }

    /// Place an off-grid element, keyed by its truncated pixel position
    pub fn place_offgrid(
        &mut self,
        layer: usize,
        record: OffgridRecord,
    ) -> Result<Option<OffgridRecord>, MapError> {
        let layer = self.layer_mut(layer)?;
        Ok(layer.off_grid.insert(record.key(), record))
    }

    /// Remove every off-grid element whose drawn box, shifted by `scroll`,
    /// contains `point`. Returns how many were removed.
    pub fn remove_offgrid<E: ElementExtents + ?Sized>(
        &mut self,
        layer: usize,
        point: [f32; 2],
        scroll: [f32; 2],
        extents: &E,
    ) -> Result<usize, MapError> {
        let layer = self.layer_mut(layer)?;
        let before = layer.off_grid.len();
        layer.off_grid.retain(|_, record| {
            let Some([w, h]) = extents.size_of(record) else {
                return true;
            };
            let hit_box = PixelRect::from_position(
                [record.position[0] + scroll[0], record.position[1] + scroll[1]],
                [w as i32, h as i32],
            );
            !hit_box.contains_point(point)
        });
        Ok(before - layer.off_grid.len())
    }

    /// Insert an empty layer right after `after`. Returns the new index.
    pub fn add_layer(&mut self, after: usize) -> Result<usize, MapError> {
        self.check_index(after)?;
        self.layers.insert(after + 1, Layer::new());
        Ok(after + 1)
    }

    /// Remove a layer; later layers shift down by one.
    ///
    /// Index 0 is protected: removing it does nothing and returns `Ok(None)`.
    pub fn remove_layer(&mut self, index: usize) -> Result<Option<Layer>, MapError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(None);
        }
        Ok(Some(self.layers.remove(index)))
    }

    pub fn set_layer_collision(&mut self, index: usize, enabled: bool) -> Result<(), MapError> {
        self.layer_mut(index)?.collision_enabled = enabled;
        Ok(())
    }

    /// Flip a layer's collision flag, returning the new value
    pub fn toggle_layer_collision(&mut self, index: usize) -> Result<bool, MapError> {
        let layer = self.layer_mut(index)?;
        layer.collision_enabled = !layer.collision_enabled;
        Ok(layer.collision_enabled)
    }

    pub fn set_layer_visible(&mut self, index: usize, visible: bool) -> Result<(), MapError> {
        self.layer_mut(index)?.visible = visible;
        Ok(())
    }

    /// Replace the border with a pixel rectangle floored to tile units
    pub fn update_border(&mut self, rect: PixelRect, tile_size: i32) {
        self.border = BorderRegion::from_pixel_rect(rect, tile_size);
    }

    /// Read-only spatial queries against this tilemap
    pub fn query<'a>(&'a self, rules: &'a ElementRules, tile_size: i32) -> SpatialQuery<'a> {
        SpatialQuery::new(self, rules, tile_size)
    }

    /// First cell (in layer order, then cell order) holding the spawn marker
    pub fn spawn_cell(&self, rules: &ElementRules) -> Option<Cell> {
        self.layers.iter().find_map(|layer| {
            layer
                .grid
                .values()
                .filter(|record| record.element == rules.spawn_marker)
                .map(|record| record.position)
                .min()
        })
    }

    /// Grid records of the actor category, in layer order then cell order
    pub fn actor_placements(&self, rules: &ElementRules) -> Vec<&TileRecord> {
        let mut placements = Vec::new();
        for layer in &self.layers {
            let mut records: Vec<_> = layer
                .grid
                .values()
                .filter(|record| record.category == rules.actor_category)
                .collect();
            records.sort_by_key(|record| record.position);
            placements.extend(records);
        }
        placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirt(x: i32, y: i32) -> TileRecord {
        TileRecord::new("tiles", "dirt", Cell::new(x, y))
    }

    #[test]
    fn test_place_overwrites() {
        let mut map = Tilemap::new("test");
        let cell = Cell::new(1, 1);
        map.place_tile(0, cell, dirt(1, 1)).unwrap();
        map.place_tile(0, cell, TileRecord::new("tiles", "castle_stone", cell))
            .unwrap();
        assert_eq!(map.layers[0].grid.len(), 1);
        assert_eq!(map.layers[0].tile(cell).unwrap().element, "castle_stone");
    }

    #[test]
    fn test_remove_tile_is_idempotent() {
        let mut map = Tilemap::new("test");
        map.place_tile(0, Cell::new(1, 1), dirt(1, 1)).unwrap();
        map.place_tile(0, Cell::new(2, 1), dirt(2, 1)).unwrap();

        map.remove_tile(0, Cell::new(1, 1)).unwrap();
        let once = map.clone();
        let second = map.remove_tile(0, Cell::new(1, 1)).unwrap();

        assert!(second.is_none());
        assert_eq!(map, once);
    }

    #[test]
    fn test_layer_ops_reject_bad_index() {
        let mut map = Tilemap::new("test");
        assert_eq!(
            map.place_tile(3, Cell::new(0, 0), dirt(0, 0)),
            Err(MapError::LayerIndex { index: 3, len: 1 })
        );
        assert!(map.add_layer(1).is_err());
        assert!(map.remove_layer(1).is_err());
    }

    #[test]
    fn test_add_layer_inserts_after() {
        let mut map = Tilemap::new("test");
        map.add_layer(0).unwrap();
        map.place_tile(1, Cell::new(0, 0), dirt(0, 0)).unwrap();

        let index = map.add_layer(0).unwrap();
        assert_eq!(index, 1);
        assert_eq!(map.layer_count(), 3);
        assert!(map.layers[1].is_empty());
        assert!(map.layers[1].collision_enabled && map.layers[1].visible);
        // The painted layer moved up
        assert_eq!(map.layers[2].grid.len(), 1);
    }

    #[test]
    fn test_remove_base_layer_is_noop() {
        let mut map = Tilemap::new("test");
        map.place_tile(0, Cell::new(0, 0), dirt(0, 0)).unwrap();
        map.add_layer(0).unwrap();
        map.add_layer(1).unwrap();
        let before = map.layers[0].clone();

        assert_eq!(map.remove_layer(0), Ok(None));
        assert_eq!(map.layer_count(), 3);
        assert_eq!(map.layers[0], before);
    }

    #[test]
    fn test_remove_layer_renumbers() {
        let mut map = Tilemap::new("test");
        map.add_layer(0).unwrap();
        map.add_layer(1).unwrap();
        map.place_tile(2, Cell::new(4, 4), dirt(4, 4)).unwrap();

        let removed = map.remove_layer(1).unwrap();
        assert!(removed.is_some());
        assert_eq!(map.layer_count(), 2);
        assert!(map.layers[1].tile(Cell::new(4, 4)).is_some());
    }

    #[test]
    fn test_remove_offgrid_hit_test_uses_scroll() {
        let mut map = Tilemap::new("test");
        map.place_offgrid(0, OffgridRecord::new("decor", "bush", [100.0, 50.0]))
            .unwrap();
        map.place_offgrid(0, OffgridRecord::new("decor", "rock", [300.0, 50.0]))
            .unwrap();
        let extents = |_: &OffgridRecord| -> Option<[f32; 2]> { Some([20.0, 10.0]) };

        // Without scroll the bush spans [100, 120) x [50, 60)
        assert_eq!(map.remove_offgrid(0, [90.0, 55.0], [0.0, 0.0], &extents), Ok(0));
        // Scrolled left by 15, it spans [85, 105)
        assert_eq!(map.remove_offgrid(0, [90.0, 55.0], [-15.0, 0.0], &extents), Ok(1));
        assert_eq!(map.layers[0].off_grid.len(), 1);
        // Absent target: no-op
        assert_eq!(map.remove_offgrid(0, [90.0, 55.0], [-15.0, 0.0], &extents), Ok(0));
    }

    #[test]
    fn test_offgrid_without_extents_is_unhittable() {
        let mut map = Tilemap::new("test");
        map.place_offgrid(0, OffgridRecord::new("decor", "bush", [0.0, 0.0]))
            .unwrap();
        let extents = |_: &OffgridRecord| -> Option<[f32; 2]> { None };
        assert_eq!(map.remove_offgrid(0, [1.0, 1.0], [0.0, 0.0], &extents), Ok(0));
    }

    #[test]
    fn test_update_border_floors() {
        let mut map = Tilemap::new("test");
        map.update_border(PixelRect::new(0, 0, 1030, 520), 32);
        assert_eq!(map.border, BorderRegion::new(0, 16, 0, 32));
    }

    #[test]
    fn test_spawn_and_actor_placements() {
        let rules = ElementRules::default();
        let mut map = Tilemap::new("test");
        map.place_tile(0, Cell::new(16, 8), TileRecord::new("utils", "player_spawner", Cell::new(16, 8)))
            .unwrap();
        map.place_tile(0, Cell::new(5, 2), TileRecord::new("entities", "mushroom", Cell::new(5, 2)))
            .unwrap();
        map.place_tile(0, Cell::new(1, 2), TileRecord::new("entities", "ba", Cell::new(1, 2)))
            .unwrap();

        assert_eq!(map.spawn_cell(&rules), Some(Cell::new(16, 8)));
        let ids: Vec<_> = map
            .actor_placements(&rules)
            .iter()
            .map(|r| r.element.as_str())
            .collect();
        assert_eq!(ids, vec!["ba", "mushroom"]);
    }
}
