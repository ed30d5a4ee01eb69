//! Shared actor state: physics body, health and animation lifecycle
//!
//! Every dynamic thing in a level (the player and each mob) is an `Actor`.
//! What differs between kinds lives in [`crate::Behavior`].

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use tilegrid_core::PixelRect;

use crate::config::{AnimationSet, AnimationSpec};

/// Visual status, reclassified every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Run,
    Jump,
    Fall,
    Hit,
    Death,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Run => "run",
            Status::Jump => "jump",
            Status::Fall => "fall",
            Status::Hit => "hit",
            Status::Death => "death",
        }
    }
}

/// Actor lifetime. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    #[default]
    Alive,
    /// Out of health; physics is suspended while the death animation plays
    Dying,
    /// The death animation finished one cycle
    Dead,
}

/// Which sides of the box were blocked during the last resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

/// A physics body with health and an animation clock
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Element id this actor was spawned from
    pub kind: String,
    /// Top-left of the bounding box, in continuous pixels
    pub position: Vec2,
    pub velocity: Vec2,
    /// Bounding box width and height
    pub size: [i32; 2],
    pub gravity: f32,
    pub terminal_fall_speed: f32,
    /// Horizontal speed when moving
    pub speed: f32,
    pub collisions: CollisionFlags,
    pub health: i32,
    pub max_health: i32,
    /// Facing left (sprite flipped)
    pub facing_left: bool,
    /// Recently damaged; further damage is ignored until the hit animation ends
    pub hit: bool,
    pub lifecycle: Lifecycle,
    pub status: Status,
    /// Fractional frame index into the current status animation
    pub anim_index: f32,
    pub animations: AnimationSet,
}

impl Actor {
    pub fn new(kind: impl Into<String>, position: Vec2, size: [i32; 2]) -> Self {
        Self {
            kind: kind.into(),
            position,
            velocity: Vec2::ZERO,
            size,
            gravity: 0.3,
            terminal_fall_speed: 8.0,
            speed: 2.5,
            collisions: CollisionFlags::default(),
            health: 1,
            max_health: 1,
            facing_left: false,
            hit: false,
            lifecycle: Lifecycle::Alive,
            status: Status::Idle,
            anim_index: 0.0,
            animations: AnimationSet::default(),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32, terminal_fall_speed: f32) -> Self {
        self.gravity = gravity;
        self.terminal_fall_speed = terminal_fall_speed;
        self
    }

    pub fn with_animations(mut self, animations: AnimationSet) -> Self {
        self.animations = animations;
        self
    }

    /// Bounding box with the position floored to whole pixels
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_position(self.position.to_array(), self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle == Lifecycle::Alive
    }

    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    /// Move along the facing direction at full speed
    pub fn move_forward(&mut self) {
        self.velocity.x = if self.facing_left {
            -self.speed
        } else {
            self.speed
        };
    }

    /// Take one point of damage and enter the hit state.
    ///
    /// Ignored while already hit. Returns whether damage was applied.
    pub fn damage(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.health -= 1;
        self.anim_index = 0.0;
        self.hit = true;
        true
    }

    pub fn current_animation(&self) -> AnimationSpec {
        self.animations.get(self.status)
    }

    /// Whether the current animation just wrapped around one full cycle.
    ///
    /// A still animation (speed 0) never advances, so it counts as complete.
    pub fn animation_cycle_complete(&self) -> bool {
        let spec = self.current_animation();
        spec.speed <= 0.0 || self.anim_index.round() as u32 == spec.frames
    }

    /// Current frame to draw
    pub fn frame(&self) -> u32 {
        self.anim_index as u32
    }

    /// Advance the animation clock by the current status speed
    pub fn advance_animation(&mut self) {
        let spec = self.current_animation();
        let frames = spec.frames.max(1) as f32;
        self.anim_index = (self.anim_index + spec.speed) % frames;
    }

    /// Derive the visual status from lifecycle, hit state and velocity
    pub fn classify_status(&self) -> Status {
        if self.lifecycle != Lifecycle::Alive {
            Status::Death
        } else if self.hit {
            Status::Hit
        } else if self.velocity.y <= -1.0 {
            Status::Jump
        } else if self.velocity.y >= 1.0 {
            Status::Fall
        } else if self.velocity.x.abs() > 0.0 {
            Status::Run
        } else {
            Status::Idle
        }
    }

    /// Enter `Dying` once health runs out, and `Dead` once the dying
    /// animation completes. Returns whether physics should run this tick.
    pub fn update_lifecycle(&mut self) -> bool {
        if self.health <= 0 && self.lifecycle == Lifecycle::Alive {
            self.lifecycle = Lifecycle::Dying;
        }
        if self.lifecycle == Lifecycle::Dying && self.animation_cycle_complete() {
            self.lifecycle = Lifecycle::Dead;
        }
        self.lifecycle == Lifecycle::Alive
    }

    /// End-of-tick bookkeeping: animation, status, and hit recovery
    pub fn finish_tick(&mut self) {
        self.advance_animation();
        self.status = self.classify_status();
        if self.hit && self.animation_cycle_complete() {
            self.hit = false;
        }
    }
}
