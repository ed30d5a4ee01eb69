//! Bevy plugin driving a [`LevelSession`] from keyboard input
//!
//! The session simulates on `FixedUpdate` at 60 Hz. Input is sampled every
//! frame and edges (jump pressed/released) are held until the next fixed
//! tick consumes them. Drawing is left to the game: read [`ActiveLevel`]
//! and the session's camera scroll from your own render systems.
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tilegrid_runtime::{LevelHandle, TilegridRuntimePlugin};
//!
//! App::new()
//!     .add_plugins((DefaultPlugins, TilegridRuntimePlugin))
//!     .add_systems(Startup, |mut commands: Commands, assets: Res<AssetServer>| {
//!         commands.insert_resource(LevelHandle(assets.load("levels/forest.level.json")));
//!     })
//!     .run();
//! ```

use bevy::log::{info, warn};
use bevy::prelude::*;
use tilegrid_core::{LevelFile, Tilemap};

use crate::behavior::PlayerInput;
use crate::config::GameConfig;
use crate::loader::{level_name_from_path, LevelFileLoader};
use crate::registry::ActorRegistry;
use crate::session::{EndState, LevelSession};

/// Simulation rate of the fixed tick
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Plugin that loads `.level.json` assets and runs the active level
pub struct TilegridRuntimePlugin;

impl Plugin for TilegridRuntimePlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<LevelFile>()
            .register_asset_loader(LevelFileLoader)
            .insert_resource(Time::<Fixed>::from_hz(TICKS_PER_SECOND))
            .init_resource::<GameConfig>()
            .insert_resource(ActorRegistry::with_defaults())
            .init_resource::<ActiveLevel>()
            .init_resource::<PendingInput>()
            .add_systems(Update, (read_keyboard, start_level_on_load, restart_on_key))
            .add_systems(FixedUpdate, tick_level);
    }
}

/// The level asset to play
#[derive(Resource, Debug, Clone)]
pub struct LevelHandle(pub Handle<LevelFile>);

/// The running session, once the level asset has loaded
#[derive(Resource, Debug, Default)]
pub struct ActiveLevel(pub Option<LevelSession>);

/// Input gathered between fixed ticks
#[derive(Resource, Debug, Default)]
pub struct PendingInput(pub PlayerInput);

impl PendingInput {
    /// Input for one tick; edges are consumed, held keys persist
    pub fn take(&mut self) -> PlayerInput {
        let input = self.0;
        self.0.jump_pressed = false;
        self.0.jump_released = false;
        input
    }
}

fn read_keyboard(keys: Res<ButtonInput<KeyCode>>, mut pending: ResMut<PendingInput>) {
    let input = &mut pending.0;
    input.left = keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    input.right = keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    input.jump_pressed |= keys.any_just_pressed([KeyCode::KeyW, KeyCode::ArrowUp]);
    input.jump_released |= keys.any_just_released([KeyCode::KeyW, KeyCode::ArrowUp]);
}

fn tick_level(mut level: ResMut<ActiveLevel>, mut pending: ResMut<PendingInput>) {
    let input = pending.take();
    if let Some(session) = level.0.as_mut() {
        session.tick(&input);
    }
}

/// Decode the loaded asset into a fresh tilemap
fn tilemap_from_asset(
    handle: &Handle<LevelFile>,
    levels: &Assets<LevelFile>,
    asset_server: &AssetServer,
) -> Option<Tilemap> {
    let file = levels.get(handle)?;
    let name = asset_server
        .get_path(handle.id())
        .map(|path| level_name_from_path(path.path()))
        .unwrap_or_default();

    match Tilemap::from_level_file(name, file) {
        Ok(tilemap) => Some(tilemap),
        Err(e) => {
            warn!("Level asset rejected: {}", e);
            None
        }
    }
}

/// Start (or hot-reload) the session when the level asset finishes loading
fn start_level_on_load(
    mut events: MessageReader<AssetEvent<LevelFile>>,
    handle: Option<Res<LevelHandle>>,
    levels: Res<Assets<LevelFile>>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    registry: Res<ActorRegistry>,
    mut level: ResMut<ActiveLevel>,
) {
    let Some(handle) = handle else {
        events.clear();
        return;
    };
    let mut reload = false;
    for event in events.read() {
        match event {
            AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id }
                if *id == handle.0.id() =>
            {
                reload = true;
            }
            _ => {}
        }
    }
    if !reload {
        return;
    }
    let Some(tilemap) = tilemap_from_asset(&handle.0, &levels, &asset_server) else {
        return;
    };
    info!("Level asset '{}' ready, starting session", tilemap.name);
    match LevelSession::start(tilemap, config.clone(), &registry) {
        Ok(session) => level.0 = Some(session),
        Err(e) => warn!("Cannot start level: {}", e),
    }
}

/// `R` on the end screen restarts from the level asset
fn restart_on_key(
    keys: Res<ButtonInput<KeyCode>>,
    handle: Option<Res<LevelHandle>>,
    levels: Res<Assets<LevelFile>>,
    asset_server: Res<AssetServer>,
    registry: Res<ActorRegistry>,
    mut level: ResMut<ActiveLevel>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    let Some(handle) = handle else { return };
    let Some(session) = level.0.as_mut() else {
        return;
    };
    if !matches!(session.end, EndState::Ended { .. }) {
        return;
    }
    let Some(tilemap) = tilemap_from_asset(&handle.0, &levels, &asset_server) else {
        return;
    };
    if let Err(e) = session.restart(tilemap, &registry) {
        warn!("Cannot restart level: {}", e);
        level.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_input_consumes_edges() {
        let mut pending = PendingInput(PlayerInput {
            right: true,
            jump_pressed: true,
            jump_released: true,
            ..Default::default()
        });

        let first = pending.take();
        assert!(first.right && first.jump_pressed && first.jump_released);

        let second = pending.take();
        assert!(second.right);
        assert!(!second.jump_pressed && !second.jump_released);
    }
}
