//! Straight-line enemy projectiles

use bevy::math::Vec2;
use tilegrid_core::PixelRect;

use crate::collision::CollisionResolver;
use crate::config::PhysicsConfig;

/// A small round shot moving at constant velocity
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Center of the shot
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Fire from `origin` toward `target` at the configured speed.
    ///
    /// A target sitting exactly on the origin yields a stationary shot.
    pub fn aimed(origin: Vec2, target: Vec2, physics: &PhysicsConfig) -> Self {
        Self {
            position: origin,
            velocity: (target - origin).normalize_or_zero() * physics.projectile_speed,
            radius: physics.projectile_radius,
        }
    }

    /// Square hit box around the center
    pub fn rect(&self) -> PixelRect {
        let r = self.radius;
        let size = (r * 2.0) as i32;
        PixelRect::from_position([self.position.x - r, self.position.y - r], [size, size])
    }

    /// Move one tick. Returns `false` once the shot is inside solid ground.
    pub fn advance(&mut self, resolver: &CollisionResolver<'_>) -> bool {
        self.position += self.velocity;
        !resolver.solid_at(self.position)
    }
}
