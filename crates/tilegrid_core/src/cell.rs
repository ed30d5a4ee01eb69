//! Integer grid coordinates
//!
//! A `Cell` is the composite key of the sparse grid. The persisted schema
//! writes it as `"X;Y"`; everything else uses the integer pair directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SchemaError;

/// The 3x3 neighborhood of a cell, in query order (center last)
pub const NEIGHBORHOOD: [(i32, i32); 9] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, 0),
];

/// An integer (x, y) grid coordinate in tile units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing a pixel position.
    ///
    /// Floors, so pixels left of / above the origin land in negative cells.
    pub fn from_pixel(pos: [f32; 2], tile_size: i32) -> Self {
        let ts = tile_size as f32;
        Self {
            x: (pos[0] / ts).floor() as i32,
            y: (pos[1] / ts).floor() as i32,
        }
    }

    /// Cell offset by (dx, dy), or `None` past the edge of the coordinate space
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Top-left pixel of this cell
    pub fn pixel_origin(self, tile_size: i32) -> [f32; 2] {
        let ts = i64::from(tile_size);
        [
            (i64::from(self.x) * ts) as f32,
            (i64::from(self.y) * ts) as f32,
        ]
    }

    /// Center pixel of this cell
    pub fn pixel_center(self, tile_size: i32) -> [f32; 2] {
        let half = tile_size as f32 / 2.0;
        let [x, y] = self.pixel_origin(tile_size);
        [x + half, y + half]
    }

    /// The cells of the neighborhood, in `NEIGHBORHOOD` order.
    ///
    /// Yields all 9 except at the `i32` limits, where cells past the edge
    /// are skipped.
    pub fn neighborhood(self) -> impl Iterator<Item = Cell> {
        NEIGHBORHOOD
            .iter()
            .filter_map(move |&(dx, dy)| self.checked_offset(dx, dy))
    }
}

impl From<[i32; 2]> for Cell {
    fn from(pos: [i32; 2]) -> Self {
        Self::new(pos[0], pos[1])
    }
}

impl From<Cell> for [i32; 2] {
    fn from(cell: Cell) -> Self {
        [cell.x, cell.y]
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

impl FromStr for Cell {
    type Err = SchemaError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaError::InvalidKey(key.to_string());
        let (x, y) = key.split_once(';').ok_or_else(invalid)?;
        let x = x.parse::<i32>().map_err(|_| invalid())?;
        let y = y.parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(x, y))
    }
}
