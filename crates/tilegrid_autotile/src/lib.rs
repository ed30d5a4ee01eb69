//! Neighbor-driven visual variants for tilegrid levels
//!
//! Auto-variant elements (dirt, castle stone) pick their sprite frame from
//! which of their 8 neighbors are auto-variant too. The mapping is a fixed,
//! ordered pattern table, so a given neighborhood always yields the same
//! variant regardless of edit history.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilegrid_autotile::{resolve_layer, DirtyCells};
//! use tilegrid_core::{Cell, ElementRules, TileRecord, Tilemap};
//!
//! let rules = ElementRules::default();
//! let mut map = Tilemap::new("level1");
//! map.place_tile(0, Cell::new(0, 0), TileRecord::new("tiles", "dirt", Cell::new(0, 0)))?;
//!
//! // Whole layer at load time
//! resolve_layer(&mut map, 0, &rules)?;
//!
//! // Or only what the editor touched since the last tick
//! let mut dirty = DirtyCells::new();
//! dirty.mark(0, Cell::new(0, 0));
//! dirty.flush(&mut map, &rules)?;
//! ```

pub mod neighbors;
pub mod resolver;
pub mod variant;

pub use neighbors::{calculate_bitmask, flags};
pub use resolver::{resolve_all, resolve_cells, resolve_layer, variant_at, DirtyCells};
pub use variant::{variant_for_mask, Pattern, DEFAULT_VARIANT, SURROUNDED_VARIANT};

// Re-export tilegrid_core
pub use tilegrid_core;
