//! Per-kind actor behavior
//!
//! Kinds share all physics through [`Actor`] and [`CollisionResolver`]; a
//! `Behavior` only decides horizontal velocity and whether to attack.

use bevy::math::Vec2;
use tilegrid_core::{LevelEnd, PixelRect};

use crate::actor::{Actor, Status};
use crate::collision::CollisionResolver;
use crate::config::PhysicsConfig;
use crate::projectile::Projectile;

/// Keyboard state for one tick.
///
/// `left`/`right` are held state; `jump_pressed`/`jump_released` are edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

/// Read-only per-tick context handed to behaviors
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub resolver: CollisionResolver<'a>,
    pub physics: &'a PhysicsConfig,
    /// The player's box as of the start of the mob pass
    pub player_rect: PixelRect,
    pub player_position: Vec2,
}

/// Sentry attack state
#[derive(Debug, Clone, PartialEq)]
pub struct SentryState {
    /// World rectangle the player must enter to draw fire
    pub attack_range: PixelRect,
    /// Ticks since the last shot, saturating at the configured cooldown
    pub cooldown: u32,
}

/// What drives an actor
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Keyboard-driven
    Player,
    /// Patrols back and forth, turning at walls and ledges
    Walker,
    /// Hovers in place, faces the player and shoots when in range
    Sentry(SentryState),
}

/// Horizontal probe distance from the box center for ledge checks
const LEDGE_PROBE_X: f32 = 10.0;
/// Vertical probe distance from the box top for ledge checks
const LEDGE_PROBE_Y: f32 = 35.0;

impl Behavior {
    /// A sentry whose attack range is 9x5 tiles, starting 4 tiles left of
    /// `position`, ready to fire immediately.
    pub fn sentry(position: Vec2, physics: &PhysicsConfig) -> Self {
        let ts = physics.tile_size;
        Behavior::Sentry(SentryState {
            attack_range: PixelRect::new(
                position.x as i32 - ts * 4,
                position.y as i32,
                ts * 9,
                ts * 5,
            ),
            cooldown: physics.attack_cooldown,
        })
    }

    /// Set the actor's horizontal velocity (and facing) for this tick
    pub fn steer(&self, actor: &mut Actor, ctx: &TickContext<'_>, input: &PlayerInput) {
        match self {
            Behavior::Player => steer_player(actor, input),
            Behavior::Walker => steer_walker(actor, ctx),
            // Sentry art faces left; it flips while the player is to its right
            Behavior::Sentry(_) => {
                actor.facing_left = ctx.player_position.x > actor.position.x;
            }
        }
    }

    /// Cooldown bookkeeping and attacks, after the actor has moved.
    ///
    /// Returns a projectile when the sentry fires.
    pub fn act(&mut self, actor: &Actor, ctx: &TickContext<'_>) -> Option<Projectile> {
        let Behavior::Sentry(state) = self else {
            return None;
        };
        let ready = ctx.physics.attack_cooldown;
        if state.cooldown != ready {
            state.cooldown += 1;
        }
        let in_range = state.attack_range.overlaps(&ctx.player_rect);
        if in_range && state.cooldown == ready && actor.is_alive() {
            state.cooldown = 0;
            let rect = actor.rect();
            let origin = Vec2::new(rect.center_x() as f32, rect.bottom() as f32);
            return Some(Projectile::aimed(
                origin,
                Vec2::from_array(ctx.player_rect.center()),
                ctx.physics,
            ));
        }
        None
    }

    /// Whether this actor's tile triggers end the level
    pub fn checks_triggers(&self) -> bool {
        matches!(self, Behavior::Player)
    }

    /// Full per-tick update: lifecycle, steering, physics, animation.
    ///
    /// Returns the level end the actor walked into, for actors that check.
    pub fn update(
        &self,
        actor: &mut Actor,
        ctx: &TickContext<'_>,
        input: &PlayerInput,
    ) -> Option<LevelEnd> {
        let mut signal = None;
        if actor.update_lifecycle() {
            self.steer(actor, ctx, input);
            let end = ctx.resolver.step(actor);
            if self.checks_triggers() {
                signal = end;
            }
        }
        actor.finish_tick();
        signal
    }
}

fn steer_player(actor: &mut Actor, input: &PlayerInput) {
    if input.left && !input.right {
        actor.velocity.x = -actor.speed;
        actor.facing_left = true;
    } else if input.right && !input.left {
        actor.velocity.x = actor.speed;
        actor.facing_left = false;
    } else {
        actor.velocity.x = 0.0;
    }
}

fn steer_walker(actor: &mut Actor, ctx: &TickContext<'_>) {
    if actor.status == Status::Idle {
        actor.velocity.x = 0.0;
        if actor.animation_cycle_complete() {
            actor.move_forward();
        }
        return;
    }

    let center_x = actor.rect().center_x() as f32;
    let probe_y = actor.position.y + LEDGE_PROBE_Y;
    let ground_ahead = ctx
        .resolver
        .solid_at(Vec2::new(center_x + LEDGE_PROBE_X, probe_y));
    let ground_behind = ctx
        .resolver
        .solid_at(Vec2::new(center_x - LEDGE_PROBE_X, probe_y));

    if actor.collisions.left || actor.collisions.right || !ground_ahead || !ground_behind {
        actor.facing_left = !actor.facing_left;
        actor.velocity.x = 0.0;
        actor.anim_index = 0.0;
    } else {
        actor.move_forward();
    }
}

/// Apply jump input edges to the player before it moves
pub fn apply_jump_input(player: &mut Actor, input: &PlayerInput, physics: &PhysicsConfig) {
    if input.jump_pressed && player.collisions.bottom {
        player.velocity.y = physics.jump_velocity;
    }
    if input.jump_released && player.velocity.y < 0.0 {
        player.velocity.y = 0.0;
    }
}
