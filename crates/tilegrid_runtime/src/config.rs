//! Runtime tuning loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) gives the stock
//! platformer feel:
//!
//! ```toml
//! [physics]
//! gravity = 0.3
//! terminal_fall_speed = 8.0
//!
//! [rules]
//! lethal = ["kill_tile", "spikes"]
//!
//! [animation.player.idle]
//! frames = 11
//! speed = 0.15
//! ```

use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tilegrid_core::ElementRules;

use crate::actor::Status;

/// Error type for config loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Integration constants shared by every actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub tile_size: i32,
    /// Added to vertical velocity every tick
    pub gravity: f32,
    pub terminal_fall_speed: f32,
    /// Vertical velocity applied on jump
    pub jump_velocity: f32,
    /// Vertical velocity given to the player after a stomp
    pub stomp_bounce: f32,
    /// Max pixel gap between the player's feet and a mob's top for a stomp
    pub stomp_tolerance: i32,
    /// Ticks between a level ending and the end screen
    pub end_sequence_ticks: u32,
    /// Ticks between sentry shots
    pub attack_cooldown: u32,
    pub projectile_speed: f32,
    pub projectile_radius: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            tile_size: 32,
            gravity: 0.3,
            terminal_fall_speed: 8.0,
            jump_velocity: -8.0,
            stomp_bounce: -5.0,
            stomp_tolerance: 8,
            end_sequence_ticks: 60,
            attack_cooldown: 180,
            projectile_speed: 3.0,
            projectile_radius: 5.0,
        }
    }
}

/// Scroll-follow tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Visible area in world pixels
    pub viewport: [f32; 2],
    /// Horizontal easing divisor (larger is slower)
    pub ease_x: f32,
    /// Vertical easing divisor
    pub ease_y: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            viewport: [640.0, 360.0],
            ease_x: 30.0,
            ease_y: 15.0,
        }
    }
}

impl CameraConfig {
    pub fn viewport(&self) -> Vec2 {
        Vec2::from_array(self.viewport)
    }
}

/// Frame count and playback speed for one status animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub frames: u32,
    /// Frames advanced per tick
    pub speed: f32,
}

impl AnimationSpec {
    pub const fn new(frames: u32, speed: f32) -> Self {
        Self { frames, speed }
    }

    /// A single frozen frame, used for statuses an actor has no animation for
    pub const STILL: AnimationSpec = AnimationSpec::new(1, 0.0);
}

/// Per-status animations of one actor kind, keyed by status name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationSet(pub BTreeMap<String, AnimationSpec>);

impl AnimationSet {
    fn from_specs(specs: &[(Status, u32, f32)]) -> Self {
        Self(
            specs
                .iter()
                .map(|&(status, frames, speed)| {
                    (status.as_str().to_string(), AnimationSpec::new(frames, speed))
                })
                .collect(),
        )
    }

    /// Animation for a status, falling back to a still frame
    pub fn get(&self, status: Status) -> AnimationSpec {
        self.0
            .get(status.as_str())
            .copied()
            .unwrap_or(AnimationSpec::STILL)
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
    pub rules: ElementRules,
    /// Animations keyed by actor element id (`player`, `mushroom`, `ba`)
    pub animation: BTreeMap<String, AnimationSet>,
}

impl Default for GameConfig {
    fn default() -> Self {
        use Status::*;

        let mut animation = BTreeMap::new();
        animation.insert(
            "player".to_string(),
            AnimationSet::from_specs(&[
                (Idle, 11, 0.15),
                (Run, 12, 0.25),
                (Jump, 1, 0.0),
                (Fall, 1, 0.0),
                (Hit, 7, 0.10),
                (Death, 7, 0.0),
            ]),
        );
        animation.insert(
            "mushroom".to_string(),
            AnimationSet::from_specs(&[
                (Idle, 14, 0.15),
                (Run, 16, 0.25),
                (Jump, 1, 0.0),
                (Fall, 1, 0.0),
                (Hit, 5, 0.10),
                (Death, 5, 0.10),
            ]),
        );
        animation.insert(
            "ba".to_string(),
            AnimationSet::from_specs(&[(Idle, 8, 0.10), (Death, 6, 0.10)]),
        );

        Self {
            physics: PhysicsConfig::default(),
            camera: CameraConfig::default(),
            rules: ElementRules::default(),
            animation,
        }
    }
}

impl GameConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Animations for an actor kind (empty set if none configured)
    pub fn animations_for(&self, kind: &str) -> AnimationSet {
        self.animation.get(kind).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.physics.tile_size, 32);
        assert!(config.rules.is_physical("mossy_stone"));
    }

    #[test]
    fn test_partial_override() {
        let config = GameConfig::from_toml_str(
            r#"
[physics]
gravity = 0.5

[rules]
lethal = ["spikes"]

[animation.player.idle]
frames = 4
speed = 0.2
"#,
        )
        .unwrap();

        assert_eq!(config.physics.gravity, 0.5);
        assert_eq!(config.physics.terminal_fall_speed, 8.0);
        assert!(config.rules.lethal.contains("spikes"));
        assert!(!config.rules.lethal.contains("kill_tile"));
        // Untouched rule sets keep their defaults
        assert!(config.rules.is_auto_variant("dirt"));

        let player = config.animations_for("player");
        assert_eq!(player.get(Status::Idle), AnimationSpec::new(4, 0.2));
        assert_eq!(player.get(Status::Run), AnimationSpec::STILL);
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(matches!(
            GameConfig::from_toml_str("[physics\ngravity = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "[physics]\njump_velocity = -10.0\n").unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.physics.jump_velocity, -10.0);

        assert!(matches!(
            GameConfig::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
