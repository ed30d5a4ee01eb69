//! Playable/editable area bounds in tile units

use serde::{Deserialize, Serialize};

use crate::{Cell, PixelRect};

/// Tile-unit rectangle bounding the playable area.
///
/// Edge ordering is not enforced: a region with `left > right` or
/// `top > bottom` is kept as given and simply contains no cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BorderRegion {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl BorderRegion {
    pub const fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Floor a pixel rectangle into tile units
    pub fn from_pixel_rect(rect: PixelRect, tile_size: i32) -> Self {
        Self {
            top: rect.top().div_euclid(tile_size),
            bottom: rect.bottom().div_euclid(tile_size),
            left: rect.left().div_euclid(tile_size),
            right: rect.right().div_euclid(tile_size),
        }
    }

    /// Region spanned by two dragged corner cells, in either order
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        Self {
            top: a.y.min(b.y),
            bottom: a.y.max(b.y),
            left: a.x.min(b.x),
            right: a.x.max(b.x),
        }
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// `left <= right` and `top <= bottom`
    pub fn is_well_formed(&self) -> bool {
        self.left <= self.right && self.top <= self.bottom
    }

    /// Whether a cell lies inside (right and bottom edges exclusive)
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.left && cell.x < self.right && cell.y >= self.top && cell.y < self.bottom
    }

    /// The region in pixel space
    pub fn pixel_rect(&self, tile_size: i32) -> PixelRect {
        PixelRect::new(
            self.left.saturating_mul(tile_size),
            self.top.saturating_mul(tile_size),
            self.width().saturating_mul(tile_size),
            self.height().saturating_mul(tile_size),
        )
    }
}
