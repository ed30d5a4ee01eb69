//! # tilegrid
//!
//! A layered 2D tile world for platformers: a sparse multi-layer grid with
//! free-positioned decorations, neighbor-driven autotiling, axis-separated
//! grid collision, a fixed-tick level runtime and a headless editor session.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use tilegrid::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(TilegridRuntimePlugin)
//!         .add_systems(Startup, setup)
//!         .run();
//! }
//!
//! fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.insert_resource(LevelHandle(asset_server.load("levels/forest.level.json")));
//! }
//! ```
//!
//! ## Features
//!
//! - `runtime` (default): level simulation and the Bevy plugin
//! - `editor` (default): headless editing session
//! - `hot-reload`: restart the running level when its file changes on disk
//!
//! ## Crates
//!
//! - [`core`]: cells, layers, the tilemap, spatial queries, level files
//! - [`autotile`]: variant resolution from the 8-neighborhood
//! - [`runtime`]: actors, collision, sessions (feature `runtime`)
//! - [`editor`]: the editor session (feature `editor`)

pub use tilegrid_autotile as autotile;
pub use tilegrid_core as core;

#[cfg(feature = "runtime")]
pub use tilegrid_runtime as runtime;

#[cfg(feature = "editor")]
pub use tilegrid_editor as editor;

/// Prelude for convenient imports
pub mod prelude {
    pub use tilegrid_autotile::{resolve_all, resolve_layer, DirtyCells};
    pub use tilegrid_core::{
        BorderRegion, Cell, ElementRules, LevelEnd, LevelFile, LevelStore, PixelRect,
        SpatialQuery, TileRecord, Tilemap,
    };

    #[cfg(feature = "runtime")]
    pub use tilegrid_runtime::prelude::*;

    #[cfg(feature = "editor")]
    pub use tilegrid_editor::EditorSession;
}
