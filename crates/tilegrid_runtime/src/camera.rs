//! Eased scroll-follow camera clamped to the level border

use bevy::math::Vec2;
use tilegrid_core::{BorderRegion, Cell, PixelRect};

use crate::config::CameraConfig;

/// Pixel lines the tracked box must stay within for the camera to center on it.
///
/// Each edge is the border edge moved inward by half a viewport, so a camera
/// centered on a bound shows exactly up to the border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CameraBounds {
    pub fn from_border(border: &BorderRegion, tile_size: i32, viewport: Vec2) -> Self {
        let ts = tile_size as f32;
        let half = viewport / 2.0;
        Self {
            left: border.left as f32 * ts + half.x,
            right: border.right as f32 * ts - half.x,
            top: border.top as f32 * ts + half.y,
            bottom: border.bottom as f32 * ts - half.y,
        }
    }
}

/// Scroll offset of the visible area (its top-left in world pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub scroll: Vec2,
    pub bounds: CameraBounds,
    pub viewport: Vec2,
}

impl Camera {
    /// Camera for a level, initially centered on the top-left of `spawn`
    pub fn new(border: &BorderRegion, spawn: Cell, tile_size: i32, config: &CameraConfig) -> Self {
        let viewport = config.viewport();
        Self {
            scroll: Vec2::from_array(spawn.pixel_origin(tile_size)) - viewport / 2.0,
            bounds: CameraBounds::from_border(border, tile_size, viewport),
            viewport,
        }
    }

    /// Ease toward the tracked box, or toward the bound it has crossed
    pub fn follow(&mut self, target: PixelRect, config: &CameraConfig) {
        let half = self.viewport / 2.0;

        let goal_x = if (target.left() as f32) < self.bounds.left {
            self.bounds.left
        } else if target.right() as f32 > self.bounds.right {
            self.bounds.right
        } else {
            target.center_x() as f32
        };
        let goal_y = if (target.top() as f32) < self.bounds.top {
            self.bounds.top
        } else if target.bottom() as f32 > self.bounds.bottom {
            self.bounds.bottom
        } else {
            target.center_y() as f32
        };

        self.scroll.x += (goal_x - half.x - self.scroll.x) / config.ease_x;
        self.scroll.y += (goal_y - half.y - self.scroll.y) / config.ease_y;
    }

    /// World position to screen position
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_camera() -> Camera {
        // 64x32 tiles = 2048x1024 px
        let border = BorderRegion::new(0, 32, 0, 64);
        Camera::new(&border, Cell::new(32, 16), 32, &CameraConfig::default())
    }

    #[test]
    fn test_bounds_inset_by_half_viewport() {
        let border = BorderRegion::new(0, 16, 0, 32);
        let bounds = CameraBounds::from_border(&border, 32, Vec2::new(640.0, 360.0));
        assert_eq!(bounds.left, 320.0);
        assert_eq!(bounds.right, 1024.0 - 320.0);
        assert_eq!(bounds.top, 180.0);
        assert_eq!(bounds.bottom, 512.0 - 180.0);
    }

    #[test]
    fn test_initial_scroll_centers_spawn() {
        let camera = level_camera();
        assert_eq!(camera.scroll, Vec2::new(1024.0 - 320.0, 512.0 - 180.0));
    }

    #[test]
    fn test_follow_eases_toward_center() {
        let config = CameraConfig::default();
        let mut camera = level_camera();
        let start = camera.scroll;

        // Box centered 300 px right of the current view center
        let rect = PixelRect::new(1024 + 300 - 8, 512 - 13, 16, 26);
        camera.follow(rect, &config);
        assert_eq!(camera.scroll.x, start.x + 300.0 / 30.0);
        assert_eq!(camera.scroll.y, start.y);
    }

    #[test]
    fn test_follow_pins_at_left_bound() {
        let config = CameraConfig::default();
        let mut camera = level_camera();
        let pinned = camera.bounds.left - camera.viewport.x / 2.0;

        let rect = PixelRect::new(10, 512 - 13, 16, 26);
        for _ in 0..2000 {
            camera.follow(rect, &config);
        }
        assert!((camera.scroll.x - pinned).abs() < 0.01);
        assert!(camera.scroll.x.abs() < 0.01);
    }
}
