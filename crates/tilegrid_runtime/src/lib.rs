//! Runtime simulation for tilegrid levels
//!
//! Turns a [`Tilemap`](tilegrid_core::Tilemap) into a playable level: a
//! player and mobs integrated against the tile grid every fixed tick, with
//! stomps, projectiles, an eased camera and a death/victory end sequence.
//!
//! The simulation itself ([`LevelSession`]) is plain data and can be ticked
//! directly, which is how the tests drive it. [`TilegridRuntimePlugin`]
//! wires it into a Bevy app.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tilegrid_runtime::prelude::*;
//!
//! let map = LevelStore::new("levels").load("forest")?;
//! let mut session = LevelSession::start(map, GameConfig::default(), &ActorRegistry::with_defaults())?;
//!
//! loop {
//!     session.tick(&PlayerInput { right: true, ..Default::default() });
//!     if let EndState::Ended { reason } = session.end {
//!         println!("level over: {}", reason.as_str());
//!         break;
//!     }
//! }
//! ```
//!
//! # Custom actors
//!
//! Mobs are spawned from grid records in the `entities` category by element
//! id. Register new kinds with [`ActorRegistry::register`]; unregistered ids
//! are skipped with a warning.

pub mod actor;
pub mod behavior;
pub mod camera;
pub mod collision;
pub mod config;
pub mod loader;
pub mod plugin;
pub mod projectile;
pub mod registry;
pub mod session;

pub use actor::{Actor, CollisionFlags, Lifecycle, Status};
pub use behavior::{apply_jump_input, Behavior, PlayerInput, SentryState, TickContext};
pub use camera::{Camera, CameraBounds};
pub use collision::CollisionResolver;
pub use config::{AnimationSet, AnimationSpec, CameraConfig, ConfigError, GameConfig, PhysicsConfig};
pub use loader::{level_name_from_path, LevelFileLoader, LevelLoadError};
pub use plugin::{ActiveLevel, LevelHandle, PendingInput, TilegridRuntimePlugin, TICKS_PER_SECOND};
pub use projectile::Projectile;
pub use registry::{ActorKind, ActorRegistry, Ba, Mob, Mushroom};
pub use session::{EndState, LevelSession, SessionError, PLAYER_HEALTH, PLAYER_KIND, PLAYER_SIZE, PLAYER_SPEED};

// Re-export the data crates
pub use tilegrid_autotile;
pub use tilegrid_core;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ActiveLevel, Actor, ActorKind, ActorRegistry, Behavior, EndState, GameConfig, LevelHandle,
        LevelSession, Mob, PlayerInput, Status, TilegridRuntimePlugin,
    };
    pub use tilegrid_core::{Cell, ElementRules, LevelEnd, LevelStore, Tilemap};
}
