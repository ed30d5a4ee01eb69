//! A running level: player, mobs, projectiles, camera and the end sequence

use bevy::log::{debug, info};
use bevy::math::Vec2;
use thiserror::Error;
use tilegrid_autotile::resolve_all;
use tilegrid_core::{LevelEnd, Tilemap};

use crate::actor::{Actor, Status};
use crate::behavior::{apply_jump_input, Behavior, PlayerInput, TickContext};
use crate::camera::Camera;
use crate::collision::CollisionResolver;
use crate::config::{GameConfig, PhysicsConfig};
use crate::projectile::Projectile;
use crate::registry::{ActorRegistry, Mob};

/// Element id the player's animations are configured under
pub const PLAYER_KIND: &str = "player";
/// Player bounding box
pub const PLAYER_SIZE: [i32; 2] = [16, 26];
pub const PLAYER_HEALTH: i32 = 3;
pub const PLAYER_SPEED: f32 = 2.5;

/// Errors starting a level session
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Level '{level}' has no player spawn marker")]
    NoSpawn { level: String },
}

/// Where the level is in its end sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndState {
    #[default]
    Alive,
    /// The level is over; the world is frozen while the fade plays
    Ending { reason: LevelEnd, timer: u32 },
    /// The end screen is showing; only a restart leaves this state
    Ended { reason: LevelEnd },
}

impl EndState {
    pub fn is_alive(&self) -> bool {
        matches!(self, EndState::Alive)
    }

    pub fn reason(&self) -> Option<LevelEnd> {
        match *self {
            EndState::Alive => None,
            EndState::Ending { reason, .. } | EndState::Ended { reason } => Some(reason),
        }
    }

    /// Fade progress in `0.0..=1.0`
    pub fn fade(&self, duration: u32) -> f32 {
        match *self {
            EndState::Alive => 0.0,
            EndState::Ending { timer, .. } => (timer as f32 / duration.max(1) as f32).min(1.0),
            EndState::Ended { .. } => 1.0,
        }
    }
}

/// One playthrough of a level
#[derive(Debug, Clone)]
pub struct LevelSession {
    pub tilemap: Tilemap,
    pub config: GameConfig,
    pub player: Actor,
    pub mobs: Vec<Mob>,
    pub projectiles: Vec<Projectile>,
    pub camera: Camera,
    pub end: EndState,
    ticks: u64,
}

impl LevelSession {
    /// Prepare a tilemap for play.
    ///
    /// Recomputes every auto-variant, places the player at the spawn marker
    /// and spawns each registered actor whose cell lies inside the border.
    pub fn start(
        mut tilemap: Tilemap,
        config: GameConfig,
        registry: &ActorRegistry,
    ) -> Result<Self, SessionError> {
        let rules = &config.rules;
        let ts = config.physics.tile_size;

        let spawn = tilemap
            .spawn_cell(rules)
            .ok_or_else(|| SessionError::NoSpawn {
                level: tilemap.name.clone(),
            })?;
        let updated = resolve_all(&mut tilemap, rules);
        debug!("Resolved {} auto-variant tiles in '{}'", updated, tilemap.name);

        let player = Actor::new(
            PLAYER_KIND,
            Vec2::from_array(spawn.pixel_origin(ts)),
            PLAYER_SIZE,
        )
        .with_health(PLAYER_HEALTH)
        .with_speed(PLAYER_SPEED)
        .with_gravity(config.physics.gravity, config.physics.terminal_fall_speed)
        .with_animations(config.animations_for(PLAYER_KIND));

        let border = tilemap.border;
        let placements = tilemap
            .actor_placements(rules)
            .into_iter()
            .filter(|record| border.contains(record.position));
        let mobs = registry.spawn_all(placements, &config);

        let camera = Camera::new(&border, spawn, ts, &config.camera);

        info!(
            "Started level '{}' with {} mobs, player at {}",
            tilemap.name,
            mobs.len(),
            spawn
        );

        Ok(Self {
            tilemap,
            config,
            player,
            mobs,
            projectiles: Vec::new(),
            camera,
            end: EndState::Alive,
            ticks: 0,
        })
    }

    /// Throw away all runtime state and start over from `tilemap`
    pub fn restart(
        &mut self,
        tilemap: Tilemap,
        registry: &ActorRegistry,
    ) -> Result<(), SessionError> {
        info!("Restarting level '{}'", tilemap.name);
        *self = Self::start(tilemap, self.config.clone(), registry)?;
        Ok(())
    }

    /// Number of ticks simulated since start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Start the end sequence. Has no effect once the level is already ending.
    pub fn trigger_end(&mut self, reason: LevelEnd) {
        if !self.end.is_alive() {
            return;
        }
        info!("Level '{}' ended: {}", self.tilemap.name, reason.as_str());
        self.end = EndState::Ending { reason, timer: 0 };
        if reason == LevelEnd::Death {
            self.player.anim_index = 0.0;
            self.player.status = Status::Death;
        }
    }

    fn advance_end_sequence(&mut self) {
        if let EndState::Ending { reason, timer } = self.end {
            let timer = timer + 1;
            self.end = if timer >= self.config.physics.end_sequence_ticks {
                EndState::Ended { reason }
            } else {
                EndState::Ending { reason, timer }
            };
        }
    }

    /// Advance the simulation by one fixed tick
    pub fn tick(&mut self, input: &PlayerInput) {
        self.ticks += 1;
        if self.end.is_alive() {
            apply_jump_input(&mut self.player, input, &self.config.physics);
        }

        self.advance_end_sequence();

        if self.end.is_alive() {
            let signal = self.update_world(input);
            if let Some(reason) = signal {
                self.trigger_end(reason);
            }
            if self.player.health <= 0 {
                self.trigger_end(LevelEnd::Death);
            }
        }

        self.camera.follow(self.player.rect(), &self.config.camera);
    }

    /// Player, mobs, contacts and projectiles. Returns the level end the
    /// player walked into, if any.
    fn update_world(&mut self, input: &PlayerInput) -> Option<LevelEnd> {
        let physics = &self.config.physics;
        let query = self.tilemap.query(&self.config.rules, physics.tile_size);
        let resolver = CollisionResolver::new(query);
        let player = &mut self.player;

        let ctx = TickContext {
            resolver,
            physics,
            player_rect: player.rect(),
            player_position: player.position,
        };
        let signal = Behavior::Player.update(player, &ctx, input);

        let ctx = TickContext {
            player_rect: player.rect(),
            player_position: player.position,
            ..ctx
        };
        let projectiles = &mut self.projectiles;
        self.mobs.retain_mut(|mob| {
            mob.behavior.update(&mut mob.actor, &ctx, &PlayerInput::default());
            if let Some(shot) = mob.behavior.act(&mob.actor, &ctx) {
                projectiles.push(shot);
            }

            if mob.actor.is_dead() {
                debug!("Removing dead {}", mob.actor.kind);
                return false;
            }
            if mob.actor.is_alive() && mob.actor.rect().overlaps(&player.rect()) {
                resolve_contact(player, &mut mob.actor, physics);
            }
            true
        });

        projectiles.retain_mut(|shot| {
            if !shot.advance(&resolver) {
                return false;
            }
            if !player.hit && shot.rect().overlaps(&player.rect()) {
                player.damage();
                return false;
            }
            true
        });

        signal
    }
}

/// Player/mob contact: a stomp when the player comes down onto the mob's
/// top, otherwise the player takes a hit.
fn resolve_contact(player: &mut Actor, mob: &mut Actor, physics: &PhysicsConfig) {
    let gap = (player.rect().bottom() - mob.rect().top()).abs();
    if player.velocity.y >= 0.0 && gap < physics.stomp_tolerance {
        mob.anim_index = 0.0;
        mob.health -= 1;
        player.velocity.y = physics.stomp_bounce;
    } else {
        player.damage();
    }
}
