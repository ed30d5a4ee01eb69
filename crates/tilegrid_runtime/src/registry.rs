//! Actor registry for spawning mobs from level data
//!
//! Grid records in the actor category name an element id (`mushroom`,
//! `ba`, ...). The registry maps each id to the kind that builds it; the
//! lookup happens once when a level session starts.

use bevy::log::warn;
use bevy::math::Vec2;
use bevy::prelude::Resource;
use std::collections::HashMap;
use std::marker::PhantomData;
use tilegrid_core::TileRecord;

use crate::actor::Actor;
use crate::behavior::Behavior;
use crate::config::GameConfig;

/// A spawned non-player actor
#[derive(Debug, Clone, PartialEq)]
pub struct Mob {
    pub actor: Actor,
    pub behavior: Behavior,
}

/// Trait implemented by actor kinds that can be spawned from level data.
///
/// # Example
///
/// ```rust,ignore
/// struct Slime;
///
/// impl ActorKind for Slime {
///     fn element_id() -> &'static str {
///         "slime"
///     }
///
///     fn spawn(position: Vec2, config: &GameConfig) -> Mob {
///         Mob {
///             actor: Actor::new("slime", position, [24, 16]),
///             behavior: Behavior::Walker,
///         }
///     }
/// }
///
/// registry.register::<Slime>();
/// ```
pub trait ActorKind: Send + Sync + 'static {
    /// Element id as placed in the editor
    fn element_id() -> &'static str;

    /// Build the actor with its box's top-left at `position`
    fn spawn(position: Vec2, config: &GameConfig) -> Mob;
}

/// Trait object for spawning actors
trait ActorSpawner: Send + Sync {
    fn spawn(&self, position: Vec2, config: &GameConfig) -> Mob;
}

/// Generic spawner implementation for any ActorKind
struct TypedSpawner<T: ActorKind> {
    _marker: PhantomData<T>,
}

impl<T: ActorKind> ActorSpawner for TypedSpawner<T> {
    fn spawn(&self, position: Vec2, config: &GameConfig) -> Mob {
        T::spawn(position, config)
    }
}

/// Patrolling mushroom
pub struct Mushroom;

impl ActorKind for Mushroom {
    fn element_id() -> &'static str {
        "mushroom"
    }

    fn spawn(position: Vec2, config: &GameConfig) -> Mob {
        let physics = &config.physics;
        Mob {
            actor: Actor::new(Self::element_id(), position, [30, 28])
                .with_speed(1.0)
                .with_gravity(physics.gravity, physics.terminal_fall_speed)
                .with_animations(config.animations_for(Self::element_id())),
            behavior: Behavior::Walker,
        }
    }
}

/// Floating turret
pub struct Ba;

impl ActorKind for Ba {
    fn element_id() -> &'static str {
        "ba"
    }

    fn spawn(position: Vec2, config: &GameConfig) -> Mob {
        let physics = &config.physics;
        Mob {
            actor: Actor::new(Self::element_id(), position, [32, 32])
                .with_gravity(0.0, physics.terminal_fall_speed)
                .with_animations(config.animations_for(Self::element_id())),
            behavior: Behavior::sentry(position, physics),
        }
    }
}

/// Registry storing actor spawners by element id
#[derive(Resource, Default)]
pub struct ActorRegistry {
    spawners: HashMap<String, Box<dyn ActorSpawner>>,
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.spawners.keys().collect();
        ids.sort();
        f.debug_struct("ActorRegistry").field("kinds", &ids).finish()
    }
}

impl ActorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in kinds
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<Mushroom>();
        registry.register::<Ba>();
        registry
    }

    /// Register a new actor kind
    pub fn register<T: ActorKind>(&mut self) {
        self.spawners.insert(
            T::element_id().to_string(),
            Box::new(TypedSpawner::<T> {
                _marker: PhantomData,
            }),
        );
    }

    /// Check if an element id is registered
    pub fn is_registered(&self, element_id: &str) -> bool {
        self.spawners.contains_key(element_id)
    }

    /// Get the number of registered kinds
    pub fn len(&self) -> usize {
        self.spawners.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.spawners.is_empty()
    }

    /// Spawn the actor for a placed record at the top-left of its cell.
    ///
    /// Returns `None` if the element id is not registered.
    pub fn spawn(&self, record: &TileRecord, config: &GameConfig) -> Option<Mob> {
        let spawner = self.spawners.get(&record.element)?;
        let origin = record.position.pixel_origin(config.physics.tile_size);
        Some(spawner.spawn(Vec2::from_array(origin), config))
    }

    /// Spawn every placement, skipping unregistered ids with a warning
    pub fn spawn_all<'a, I>(&self, records: I, config: &GameConfig) -> Vec<Mob>
    where
        I: IntoIterator<Item = &'a TileRecord>,
    {
        let mut mobs = Vec::new();
        for record in records {
            match self.spawn(record, config) {
                Some(mob) => mobs.push(mob),
                None => warn!(
                    "Actor kind '{}' at {} not registered - skipped (use ActorRegistry::register to add it)",
                    record.element, record.position
                ),
            }
        }
        mobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilegrid_core::Cell;

    #[test]
    fn test_registry_register() {
        let mut registry = ActorRegistry::new();
        assert!(registry.is_empty());

        registry.register::<Mushroom>();

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered("mushroom"));
        assert!(!registry.is_registered("ba"));
    }

    #[test]
    fn test_spawn_places_at_cell_origin() {
        let registry = ActorRegistry::with_defaults();
        let config = GameConfig::default();
        let record = TileRecord::new("entities", "mushroom", Cell::new(3, 4));

        let mob = registry.spawn(&record, &config).unwrap();
        assert_eq!(mob.actor.position, Vec2::new(96.0, 128.0));
        assert_eq!(mob.actor.size, [30, 28]);
        assert_eq!(mob.behavior, Behavior::Walker);
    }

    #[test]
    fn test_sentry_has_no_gravity() {
        let registry = ActorRegistry::with_defaults();
        let config = GameConfig::default();
        let record = TileRecord::new("entities", "ba", Cell::new(10, 2));

        let mob = registry.spawn(&record, &config).unwrap();
        assert_eq!(mob.actor.gravity, 0.0);
        assert!(matches!(mob.behavior, Behavior::Sentry(_)));
    }

    #[test]
    fn test_spawn_all_skips_unknown() {
        let registry = ActorRegistry::with_defaults();
        let config = GameConfig::default();
        let records = [
            TileRecord::new("entities", "mushroom", Cell::new(0, 0)),
            TileRecord::new("entities", "dragon", Cell::new(1, 0)),
            TileRecord::new("entities", "ba", Cell::new(2, 0)),
        ];

        let mobs = registry.spawn_all(&records, &config);
        let kinds: Vec<_> = mobs.iter().map(|m| m.actor.kind.as_str()).collect();
        assert_eq!(kinds, vec!["mushroom", "ba"]);
    }
}
