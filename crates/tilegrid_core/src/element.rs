//! Element classification rules
//!
//! Placed elements are identified by a category (the asset folder they come
//! from: `tiles`, `decor`, `entities`, `utils`) and an element id. Gameplay
//! behavior keys on the element id:
//! - physical ids produce blocking geometry
//! - auto-variant ids get their visual variant from their neighbors
//! - lethal and goal ids end the level when an actor's center enters them

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a level ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelEnd {
    /// A lethal tile was touched or the player ran out of health
    Death,
    /// A goal tile was reached
    Victory,
}

impl LevelEnd {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelEnd::Death => "death",
            LevelEnd::Victory => "victory",
        }
    }
}

/// Element-id sets that drive collision, autotiling and triggers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementRules {
    /// Ids that participate in blocking collision
    pub physical: BTreeSet<String>,
    /// Ids whose variant is derived from their neighborhood
    pub auto_variant: BTreeSet<String>,
    /// Ids that kill on contact
    pub lethal: BTreeSet<String>,
    /// Ids that win the level on contact
    pub goal: BTreeSet<String>,
    /// Id of the player spawn marker
    pub spawn_marker: String,
    /// Category whose grid records are spawned as actors
    pub actor_category: String,
}

fn set(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

impl Default for ElementRules {
    fn default() -> Self {
        Self {
            physical: set(&[
                "dirt",
                "mossy_stone",
                "castle_stone",
                "kill_tile",
                "victory_tile",
            ]),
            auto_variant: set(&["dirt", "castle_stone"]),
            lethal: set(&["kill_tile"]),
            goal: set(&["victory_tile"]),
            spawn_marker: "player_spawner".to_string(),
            actor_category: "entities".to_string(),
        }
    }
}

impl ElementRules {
    pub fn is_physical(&self, element: &str) -> bool {
        self.physical.contains(element)
    }

    pub fn is_auto_variant(&self, element: &str) -> bool {
        self.auto_variant.contains(element)
    }

    /// Lethal or goal: participates in triggers, never blocks motion
    pub fn is_trigger(&self, element: &str) -> bool {
        self.trigger_kind(element).is_some()
    }

    /// The level end a tile triggers, if any. Lethal wins over goal.
    pub fn trigger_kind(&self, element: &str) -> Option<LevelEnd> {
        if self.lethal.contains(element) {
            Some(LevelEnd::Death)
        } else if self.goal.contains(element) {
            Some(LevelEnd::Victory)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = ElementRules::default();
        assert!(rules.is_physical("mossy_stone"));
        assert!(rules.is_physical("kill_tile"));
        assert!(!rules.is_physical("grass"));
        assert!(rules.is_auto_variant("dirt"));
        assert!(!rules.is_auto_variant("mossy_stone"));
        assert_eq!(rules.trigger_kind("kill_tile"), Some(LevelEnd::Death));
        assert_eq!(rules.trigger_kind("victory_tile"), Some(LevelEnd::Victory));
        assert_eq!(rules.trigger_kind("dirt"), None);
    }

    #[test]
    fn test_partial_rules_keep_defaults() {
        let rules: ElementRules =
            serde_json::from_str(r#"{ "auto_variant": ["grass"] }"#).unwrap();
        assert!(rules.is_auto_variant("grass"));
        assert!(!rules.is_auto_variant("dirt"));
        assert!(rules.is_physical("dirt"));
        assert_eq!(rules.spawn_marker, "player_spawner");
    }
}
