//! Integer pixel rectangles used for collision boxes and hit tests

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in integer pixel space.
///
/// Overlap is strict: rectangles that only share an edge do not collide.
/// Point containment is half-open (`left <= x < right`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle whose top-left is a continuous position, floored to pixels
    pub fn from_position(pos: [f32; 2], size: [i32; 2]) -> Self {
        Self {
            x: pos[0].floor() as i32,
            y: pos[1].floor() as i32,
            w: size[0],
            h: size[1],
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    pub fn center_x(&self) -> i32 {
        self.x.saturating_add(self.w / 2)
    }

    pub fn center_y(&self) -> i32 {
        self.y.saturating_add(self.h / 2)
    }

    pub fn center(&self) -> [f32; 2] {
        [self.center_x() as f32, self.center_y() as f32]
    }

    /// Move so the left edge sits at `x`
    pub fn set_left(&mut self, x: i32) {
        self.x = x;
    }

    /// Move so the right edge sits at `x`
    pub fn set_right(&mut self, x: i32) {
        self.x = x.saturating_sub(self.w);
    }

    /// Move so the top edge sits at `y`
    pub fn set_top(&mut self, y: i32) {
        self.y = y;
    }

    /// Move so the bottom edge sits at `y`
    pub fn set_bottom(&mut self, y: i32) {
        self.y = y.saturating_sub(self.h);
    }

    /// Copy shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open point containment
    pub fn contains_point(&self, point: [f32; 2]) -> bool {
        let [px, py] = point;
        px >= self.left() as f32
            && px < self.right() as f32
            && py >= self.top() as f32
            && py < self.bottom() as f32
    }
}
