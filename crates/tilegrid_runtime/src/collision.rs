//! Axis-separated collision against the tile grid
//!
//! Each tick an actor moves on X, is pushed out of blocking tiles on X, then
//! does the same on Y. Blocking geometry comes only from
//! [`SpatialQuery::physics_rects_around`], sampled at one point on the
//! leading edge of the box per axis.
//!
//! Limitation: sampling a single point means a box wider or taller than one
//! tile can pass through a tile whose 3x3 neighborhood does not include the
//! sample point. Levels are authored around this.

use bevy::math::Vec2;
use tilegrid_core::{LevelEnd, PixelRect, SpatialQuery};

use crate::actor::Actor;

/// Moves actors through a tilemap for one tick
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver<'a> {
    query: SpatialQuery<'a>,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(query: SpatialQuery<'a>) -> Self {
        Self { query }
    }

    pub fn query(&self) -> SpatialQuery<'a> {
        self.query
    }

    /// Blocking rectangles near `point`, without lethal or goal tiles
    fn blockers(&self, point: [i32; 2]) -> impl Iterator<Item = PixelRect> + 'a {
        let rules = self.query.rules();
        self.query
            .physics_rects_around([point[0] as f32, point[1] as f32])
            .into_iter()
            .filter(move |hit| !rules.is_trigger(hit.element))
            .map(|hit| hit.rect)
    }

    /// Integrate X and push the box out of anything it now overlaps
    pub fn resolve_horizontal(&self, actor: &mut Actor) {
        actor.position.x += actor.velocity.x;
        actor.collisions.left = false;
        actor.collisions.right = false;

        let mut rect = actor.rect();
        if actor.velocity.x < 0.0 {
            for tile in self.blockers([rect.left(), rect.center_y()]) {
                if rect.overlaps(&tile) {
                    rect.set_left(tile.right());
                    actor.position.x = rect.left() as f32;
                    actor.collisions.left = true;
                }
            }
        } else {
            for tile in self.blockers([rect.right(), rect.center_y()]) {
                if rect.overlaps(&tile) {
                    rect.set_right(tile.left());
                    actor.position.x = rect.left() as f32;
                    actor.collisions.right = true;
                }
            }
        }
    }

    /// `velocity.y = min(velocity.y + gravity, terminal_fall_speed)`
    pub fn apply_gravity(&self, actor: &mut Actor) {
        actor.velocity.y = (actor.velocity.y + actor.gravity).min(actor.terminal_fall_speed);
    }

    /// Integrate Y and push the box out vertically.
    ///
    /// When falling, a box resting one pixel above a tile also counts as a
    /// hit so fast falls land instead of tunneling.
    pub fn resolve_vertical(&self, actor: &mut Actor) {
        actor.position.y += actor.velocity.y;
        actor.collisions.top = false;
        actor.collisions.bottom = false;

        let mut rect = actor.rect();
        if actor.velocity.y >= 0.0 {
            for tile in self.blockers([rect.center_x(), rect.bottom()]) {
                if rect.overlaps(&tile) || rect.translated(0, 1).overlaps(&tile) {
                    rect.set_bottom(tile.top());
                    actor.velocity.y = 0.0;
                    actor.position.y = rect.top() as f32;
                    actor.collisions.bottom = true;
                }
            }
        } else {
            for tile in self.blockers([rect.center_x(), rect.top()]) {
                if rect.overlaps(&tile) {
                    rect.set_top(tile.bottom());
                    actor.velocity.y = 0.0;
                    actor.position.y = rect.top() as f32;
                    actor.collisions.top = true;
                }
            }
        }
    }

    /// Gravity followed by the vertical pass
    pub fn step_vertical(&self, actor: &mut Actor) {
        self.apply_gravity(actor);
        self.resolve_vertical(actor);
    }

    /// Level end triggered by the tile under the box center
    pub fn trigger(&self, actor: &Actor) -> Option<LevelEnd> {
        self.query.trigger_check(actor.rect().center())
    }

    /// One full physics step with the horizontal velocity already chosen.
    ///
    /// Returns the level end the actor's center landed on, if any. Triggers
    /// never block movement.
    pub fn step(&self, actor: &mut Actor) -> Option<LevelEnd> {
        self.resolve_horizontal(actor);
        self.step_vertical(actor);
        self.trigger(actor)
    }

    /// Whether the cell under `point` holds a physical tile on any layer
    pub fn solid_at(&self, point: Vec2) -> bool {
        self.query.solid_check(point.to_array())
    }
}
