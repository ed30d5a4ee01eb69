//! Headless level editing for tilegrid
//!
//! [`EditorSession`] owns an open [`Tilemap`](tilegrid_core::Tilemap) and
//! applies editor actions to it: painting and erasing under the mouse, layer
//! management, the border drag tool and saving. Auto-variant tiles touched by
//! an edit are queued and resolved on the next [`EditorSession::tick`].
//!
//! # Example
//!
//! ```rust,ignore
//! use bevy::math::Vec2;
//! use tilegrid_core::{ElementRules, LevelStore};
//! use tilegrid_editor::EditorSession;
//!
//! let store = LevelStore::new("levels");
//! let mut editor = EditorSession::open(&store, "forest", ElementRules::default(), 32)?;
//!
//! editor.select_element("tiles", "castle_stone");
//! editor.paint(Vec2::new(200.0, 120.0))?;
//! editor.tick()?;
//! editor.save(&store)?;
//! ```

pub mod session;

pub use session::{Brush, EditorSession};

// Re-export tilegrid_core
pub use tilegrid_core;
