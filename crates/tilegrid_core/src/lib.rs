//! Core data structures for tilegrid
//!
//! This crate provides the fundamental types for representing layered tile levels:
//! - `Tilemap` - A complete level: ordered layers plus a border region
//! - `Layer` - One sparse grid of `TileRecord`s plus free-floating `OffgridRecord`s
//! - `SpatialQuery` - Read-only neighborhood, collision and trigger queries
//! - `ElementRules` - Which element ids are physical, auto-variant, lethal or goal
//! - `LevelFile` / `LevelStore` - The persisted JSON format and its directory store

mod border;
mod cell;
mod element;
mod error;
mod geometry;
mod layer;
mod query;
mod record;
mod schema;
mod store;
mod tilemap;

pub use border::BorderRegion;
pub use cell::{Cell, NEIGHBORHOOD};
pub use element::{ElementRules, LevelEnd};
pub use error::{LevelError, MapError, SchemaError};
pub use geometry::PixelRect;
pub use layer::Layer;
pub use query::{PhysicsRect, SpatialQuery, TileHit};
pub use record::{OffgridRecord, TileRecord};
pub use schema::{GridRecordFile, LayerFile, LevelFile, OffgridRecordFile};
pub use store::{validate_name, LevelStore, LEVEL_EXTENSION, MAX_NAME_LEN};
pub use tilemap::{ElementExtents, Tilemap};
