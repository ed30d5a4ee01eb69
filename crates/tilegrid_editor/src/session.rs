//! Editing state for one level
//!
//! Input handling lives with whoever owns the window. The session takes
//! mouse positions in screen pixels and turns them into grid edits through
//! the current scroll offset, so it can be driven from a Bevy system, a
//! test, or a script alike.

use bevy::log::{debug, info, warn};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::path::PathBuf;
use tilegrid_autotile::DirtyCells;
use tilegrid_core::{
    BorderRegion, Cell, ElementExtents, ElementRules, LevelError, LevelStore, MapError,
    OffgridRecord, TileRecord, Tilemap,
};

/// The element placed by [`EditorSession::paint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    /// Asset folder (`tiles`, `decor`, `entities`, `utils`)
    pub category: String,
    pub element: String,
}

impl Brush {
    pub fn new(category: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            element: element.into(),
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new("tiles", "dirt")
    }
}

/// An open level in the editor
#[derive(Resource, Debug, Clone)]
pub struct EditorSession {
    pub tilemap: Tilemap,
    pub rules: ElementRules,
    pub tile_size: i32,
    /// Layer that paint, erase and layer operations act on
    pub selected_layer: usize,
    /// Screen position of the world origin
    pub scroll: Vec2,
    pub brush: Brush,
    /// Place and erase free-positioned elements instead of grid tiles
    pub off_grid: bool,
    /// First corner of a border drag in progress
    border_drag: Option<Cell>,
    dirty: DirtyCells,
    unsaved: bool,
}

impl EditorSession {
    pub fn new(tilemap: Tilemap, rules: ElementRules, tile_size: i32) -> Self {
        Self {
            tilemap,
            rules,
            tile_size,
            selected_layer: 0,
            scroll: Vec2::ZERO,
            brush: Brush::default(),
            off_grid: false,
            border_drag: None,
            dirty: DirtyCells::new(),
            unsaved: false,
        }
    }

    /// Open a level from the store. A level that does not exist yet opens
    /// as the default template.
    pub fn open(
        store: &LevelStore,
        name: &str,
        rules: ElementRules,
        tile_size: i32,
    ) -> Result<Self, LevelError> {
        let tilemap = store.load(name)?;
        info!("Opened level '{}' ({} layers)", name, tilemap.layer_count());
        Ok(Self::new(tilemap, rules, tile_size))
    }

    /// Whether there are edits not yet written by [`save`](Self::save)
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Cells edited since the last [`tick`](Self::tick)
    pub fn pending_cells(&self) -> usize {
        self.dirty.len()
    }

    /// Screen position to world pixels
    pub fn world_position(&self, mouse: Vec2) -> Vec2 {
        mouse - self.scroll
    }

    /// Screen position to the grid cell under it
    pub fn grid_position(&self, mouse: Vec2) -> Cell {
        Cell::from_pixel(self.world_position(mouse).to_array(), self.tile_size)
    }

    /// Move the view by `delta` screen pixels
    pub fn pan(&mut self, delta: Vec2) {
        self.scroll += delta;
    }

    pub fn select_element(&mut self, category: impl Into<String>, element: impl Into<String>) {
        self.brush = Brush::new(category, element);
    }

    /// Place the brush element under the mouse on the selected layer
    pub fn paint(&mut self, mouse: Vec2) -> Result<(), MapError> {
        let Brush { category, element } = self.brush.clone();
        if self.off_grid {
            let position = self.world_position(mouse).to_array();
            self.tilemap.place_offgrid(
                self.selected_layer,
                OffgridRecord::new(category, element, position),
            )?;
        } else {
            let cell = self.grid_position(mouse);
            self.tilemap.place_tile(
                self.selected_layer,
                cell,
                TileRecord::new(category, element, cell),
            )?;
            self.dirty.mark(self.selected_layer, cell);
        }
        self.unsaved = true;
        Ok(())
    }

    /// Remove what is under the mouse on the selected layer. Returns how
    /// many elements were removed.
    ///
    /// Off-grid hits are tested against each element's drawn size, which
    /// `extents` supplies.
    pub fn erase<E: ElementExtents + ?Sized>(
        &mut self,
        mouse: Vec2,
        extents: &E,
    ) -> Result<usize, MapError> {
        let removed = if self.off_grid {
            self.tilemap.remove_offgrid(
                self.selected_layer,
                mouse.to_array(),
                self.scroll.to_array(),
                extents,
            )?
        } else {
            let cell = self.grid_position(mouse);
            match self.tilemap.remove_tile(self.selected_layer, cell)? {
                Some(_) => {
                    self.dirty.mark(self.selected_layer, cell);
                    1
                }
                None => 0,
            }
        };
        if removed > 0 {
            self.unsaved = true;
        }
        Ok(removed)
    }

    /// Resolve pending autotile updates. Layer indices shift on add/remove,
    /// so this runs before every layer operation as well as once per tick.
    pub fn tick(&mut self) -> Result<usize, MapError> {
        if self.dirty.is_empty() {
            return Ok(0);
        }
        let changed = self.dirty.flush(&mut self.tilemap, &self.rules)?;
        debug!("Autotile updated {} tiles", changed);
        Ok(changed)
    }

    /// Insert an empty layer above the selection and select it
    pub fn add_layer(&mut self) -> Result<usize, MapError> {
        self.tick()?;
        let index = self.tilemap.add_layer(self.selected_layer)?;
        self.selected_layer = index;
        self.unsaved = true;
        info!("Added layer {} ({} total)", index, self.tilemap.layer_count());
        Ok(index)
    }

    /// Remove the selected layer and select the one below it.
    ///
    /// The base layer cannot be removed; asking to is a no-op.
    pub fn remove_layer(&mut self) -> Result<bool, MapError> {
        self.tick()?;
        let removed = self.tilemap.remove_layer(self.selected_layer)?.is_some();
        if removed {
            info!("Removed layer {}", self.selected_layer);
            self.unsaved = true;
        }
        self.selected_layer = self.selected_layer.saturating_sub(1);
        Ok(removed)
    }

    /// Select the layer above, stopping at the top
    pub fn next_layer(&mut self) {
        if self.selected_layer + 1 < self.tilemap.layer_count() {
            self.selected_layer += 1;
        }
    }

    /// Select the layer below, stopping at the base layer
    pub fn previous_layer(&mut self) {
        self.selected_layer = self.selected_layer.saturating_sub(1);
    }

    /// Flip collision on the selected layer
    pub fn toggle_collision(&mut self) -> Result<bool, MapError> {
        let enabled = self.tilemap.toggle_layer_collision(self.selected_layer)?;
        self.unsaved = true;
        Ok(enabled)
    }

    /// Start a border drag at the mouse cell, or commit the one in progress.
    ///
    /// Returns the new border when a drag is committed.
    pub fn toggle_border(&mut self, mouse: Vec2) -> Option<BorderRegion> {
        let cell = self.grid_position(mouse);
        match self.border_drag.take() {
            None => {
                self.border_drag = Some(cell);
                None
            }
            Some(start) => {
                let border = BorderRegion::from_corners(start, cell);
                self.tilemap.border = border;
                self.unsaved = true;
                info!(
                    "Border set to left={} top={} right={} bottom={}",
                    border.left, border.top, border.right, border.bottom
                );
                Some(border)
            }
        }
    }

    /// The border the current drag would commit, for drawing
    pub fn border_preview(&self, mouse: Vec2) -> Option<BorderRegion> {
        self.border_drag
            .map(|start| BorderRegion::from_corners(start, self.grid_position(mouse)))
    }

    pub fn is_dragging_border(&self) -> bool {
        self.border_drag.is_some()
    }

    /// Write the level to the store with up-to-date variants
    pub fn save(&mut self, store: &LevelStore) -> Result<PathBuf, LevelError> {
        if let Err(e) = self.tick() {
            warn!("Dropped stale autotile update before save: {}", e);
        }
        let path = store.save(&self.tilemap)?;
        self.unsaved = false;
        info!("Saved level '{}' to {}", self.tilemap.name, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditorSession {
        EditorSession::new(Tilemap::new("edit"), ElementRules::default(), 32)
    }

    fn at(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_grid_position_uses_scroll_and_floors() {
        let mut editor = session();
        assert_eq!(editor.grid_position(at(40.0, 70.0)), Cell::new(1, 2));
        assert_eq!(editor.grid_position(at(-1.0, 0.0)), Cell::new(-1, 0));

        editor.pan(at(100.0, 0.0));
        assert_eq!(editor.grid_position(at(100.0, 0.0)), Cell::new(0, 0));
        assert_eq!(editor.grid_position(at(99.0, 0.0)), Cell::new(-1, 0));
    }

    #[test]
    fn test_paint_and_tick_resolves_variants() {
        let mut editor = session();
        for x in 0..3 {
            for y in 0..3 {
                editor.paint(at(x as f32 * 32.0 + 5.0, y as f32 * 32.0 + 5.0)).unwrap();
            }
        }
        assert_eq!(editor.pending_cells(), 9);
        assert!(editor.is_unsaved());

        editor.tick().unwrap();
        assert_eq!(editor.pending_cells(), 0);
        let layer = editor.tilemap.layer(0).unwrap();
        assert_eq!(layer.tile(Cell::new(1, 1)).unwrap().variant, 4);
        assert_eq!(layer.tile(Cell::new(2, 2)).unwrap().variant, 8);
    }

    #[test]
    fn test_erase_updates_neighbors() {
        let mut editor = session();
        for x in 0..3 {
            editor.paint(at(x as f32 * 32.0, 0.0)).unwrap();
            editor.paint(at(x as f32 * 32.0, 32.0)).unwrap();
        }
        editor.tick().unwrap();
        let no_extents = |_: &OffgridRecord| -> Option<[f32; 2]> { None };

        assert_eq!(editor.erase(at(64.0, 32.0), &no_extents).unwrap(), 1);
        assert_eq!(editor.erase(at(64.0, 32.0), &no_extents).unwrap(), 0);
        editor.tick().unwrap();

        // (1, 1) lost its east neighbor and is now a bottom-right corner
        let layer = editor.tilemap.layer(0).unwrap();
        assert_eq!(layer.tile(Cell::new(1, 1)).unwrap().variant, 8);
    }

    #[test]
    fn test_off_grid_paint_and_erase() {
        let mut editor = session();
        editor.pan(at(10.0, 10.0));
        editor.off_grid = true;
        editor.select_element("decor", "flower");
        editor.paint(at(55.5, 20.0)).unwrap();

        let layer = editor.tilemap.layer(0).unwrap();
        let record = layer.off_grid.get(&Cell::new(45, 10)).unwrap();
        assert_eq!(record.position, [45.5, 10.0]);
        assert_eq!(editor.pending_cells(), 0);

        let extents = |_: &OffgridRecord| -> Option<[f32; 2]> { Some([16.0, 16.0]) };
        assert_eq!(editor.erase(at(0.0, 0.0), &extents).unwrap(), 0);
        assert_eq!(editor.erase(at(60.0, 25.0), &extents).unwrap(), 1);
        assert!(editor.tilemap.layer(0).unwrap().off_grid.is_empty());
    }

    #[test]
    fn test_layer_cursor() {
        let mut editor = session();
        editor.previous_layer();
        assert_eq!(editor.selected_layer, 0);

        assert_eq!(editor.add_layer().unwrap(), 1);
        assert_eq!(editor.add_layer().unwrap(), 2);
        assert_eq!(editor.tilemap.layer_count(), 3);

        editor.next_layer();
        assert_eq!(editor.selected_layer, 2);
        editor.previous_layer();
        editor.previous_layer();
        assert_eq!(editor.selected_layer, 0);
        editor.next_layer();
        assert_eq!(editor.selected_layer, 1);

        assert!(editor.remove_layer().unwrap());
        assert_eq!(editor.selected_layer, 0);
        assert_eq!(editor.tilemap.layer_count(), 2);
    }

    #[test]
    fn test_base_layer_is_protected() {
        let mut editor = session();
        editor.paint(at(0.0, 0.0)).unwrap();
        assert!(!editor.remove_layer().unwrap());
        assert_eq!(editor.tilemap.layer_count(), 1);
        assert_eq!(editor.selected_layer, 0);
        assert!(editor.tilemap.layer(0).unwrap().tile(Cell::new(0, 0)).is_some());
    }

    #[test]
    fn test_layer_ops_flush_pending_edits() {
        let mut editor = session();
        editor.add_layer().unwrap();
        editor.paint(at(0.0, 0.0)).unwrap();
        editor.paint(at(32.0, 0.0)).unwrap();

        // Removing layer 1 must not leave edits queued against it
        editor.remove_layer().unwrap();
        assert_eq!(editor.pending_cells(), 0);
        assert_eq!(editor.tick().unwrap(), 0);
    }

    #[test]
    fn test_toggle_collision() {
        let mut editor = session();
        assert!(!editor.toggle_collision().unwrap());
        assert!(!editor.tilemap.layer(0).unwrap().collision_enabled);
        assert!(editor.toggle_collision().unwrap());
    }

    #[test]
    fn test_border_drag() {
        let mut editor = session();
        assert!(editor.toggle_border(at(320.0, 160.0)).is_none());
        assert!(editor.is_dragging_border());
        assert_eq!(
            editor.border_preview(at(0.0, 0.0)),
            Some(BorderRegion::new(0, 5, 0, 10))
        );

        let border = editor.toggle_border(at(0.0, 0.0)).unwrap();
        assert_eq!(border, BorderRegion::new(0, 5, 0, 10));
        assert_eq!(editor.tilemap.border, border);
        assert!(!editor.is_dragging_border());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = LevelStore::new(dir.path());
        let mut editor = EditorSession::open(&store, "fresh", ElementRules::default(), 32).unwrap();
        // A missing level opens as the template
        assert!(editor.tilemap.spawn_cell(&editor.rules).is_some());

        for (x, y) in [(0.0, 0.0), (32.0, 0.0), (0.0, 32.0), (32.0, 32.0)] {
            editor.paint(at(x, y)).unwrap();
        }
        let path = editor.save(&store).unwrap();
        assert!(path.exists());
        assert!(!editor.is_unsaved());

        let reopened = EditorSession::open(&store, "fresh", ElementRules::default(), 32).unwrap();
        let layer = reopened.tilemap.layer(0).unwrap();
        // Variants were resolved before writing
        assert_eq!(layer.tile(Cell::new(1, 0)).unwrap().variant, 2);
        assert_eq!(layer.tile(Cell::new(1, 1)).unwrap().variant, 8);
        assert_eq!(reopened.tilemap.border, editor.tilemap.border);
    }
}
