//! Grid, query, autotile and persistence behavior across crates

use tilegrid::autotile::{resolve_all, resolve_layer};
use tilegrid::core::{
    BorderRegion, Cell, ElementRules, LevelError, LevelFile, LevelStore, MapError, SchemaError,
    TileRecord, Tilemap,
};

const TS: i32 = 32;

fn tile(element: &str, x: i32, y: i32) -> TileRecord {
    TileRecord::new("tiles", element, Cell::new(x, y))
}

fn place(map: &mut Tilemap, layer: usize, element: &str, x: i32, y: i32) {
    map.place_tile(layer, Cell::new(x, y), tile(element, x, y)).unwrap();
}

#[test]
fn test_remove_tile_twice_equals_once() {
    let mut map = Tilemap::new("idempotent");
    place(&mut map, 0, "dirt", 2, 2);
    place(&mut map, 0, "dirt", 3, 2);

    map.remove_tile(0, Cell::new(2, 2)).unwrap();
    let after_once = map.clone();
    assert_eq!(map.remove_tile(0, Cell::new(2, 2)).unwrap(), None);
    assert_eq!(map, after_once);
}

#[test]
fn test_placed_tile_is_found_around_its_pixel() {
    let rules = ElementRules::default();
    let mut map = Tilemap::new("around");
    map.add_layer(0).unwrap();
    place(&mut map, 1, "castle_stone", -4, 7);

    let query = map.query(&rules, TS);
    let hits = query.tiles_around(Cell::new(-4, 7).pixel_origin(TS));
    assert!(hits
        .iter()
        .any(|hit| hit.layer == 1 && *hit.record == tile("castle_stone", -4, 7)));
}

#[test]
fn test_solid_check_ignores_collision_flag() {
    let rules = ElementRules::default();
    let mut map = Tilemap::new("solid");
    map.add_layer(0).unwrap();
    place(&mut map, 1, "mossy_stone", 1, 1);
    place(&mut map, 0, "flower", 2, 1);
    map.set_layer_collision(1, false).unwrap();

    let query = map.query(&rules, TS);
    assert!(query.solid_check([40.0, 40.0]));
    assert!(query.physics_rects_around([40.0, 40.0]).is_empty());
    // Non-physical ids are never solid
    assert!(!query.solid_check([70.0, 40.0]));
    // Nothing out in the void
    assert!(!query.solid_check([-5000.0, 9000.0]));
    assert!(query.tiles_around([-5000.0, 9000.0]).is_empty());
}

#[test]
fn test_layer_zero_is_protected() {
    let mut map = Tilemap::new("layers");
    place(&mut map, 0, "dirt", 0, 0);
    map.add_layer(0).unwrap();
    map.add_layer(1).unwrap();
    let base = map.layer(0).unwrap().clone();

    assert_eq!(map.remove_layer(0).unwrap(), None);
    assert_eq!(map.layer_count(), 3);
    assert_eq!(map.layer(0).unwrap(), &base);
}

#[test]
fn test_out_of_range_layer_is_an_error() {
    let mut map = Tilemap::new("range");
    let err = || MapError::LayerIndex { index: 4, len: 1 };
    assert_eq!(map.add_layer(4), Err(err()));
    assert_eq!(map.remove_layer(4).unwrap_err(), err());
    assert_eq!(
        map.place_tile(4, Cell::new(0, 0), tile("dirt", 0, 0))
            .unwrap_err(),
        err()
    );
    assert_eq!(map.layer_count(), 1);
}

#[test]
fn test_autotile_ignores_history() {
    let rules = ElementRules::default();
    let shape = [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (1, 2), (5, 5)];

    // Same shape placed in opposite orders, one with garbage variants
    let mut forward = Tilemap::new("forward");
    for &(x, y) in &shape {
        place(&mut forward, 0, "dirt", x, y);
    }
    let mut backward = Tilemap::new("backward");
    for &(x, y) in shape.iter().rev() {
        backward
            .place_tile(0, Cell::new(x, y), tile("dirt", x, y).with_variant(11))
            .unwrap();
    }

    resolve_layer(&mut forward, 0, &rules).unwrap();
    resolve_all(&mut backward, &rules);
    for &(x, y) in &shape {
        let cell = Cell::new(x, y);
        assert_eq!(
            forward.layer(0).unwrap().tile(cell).unwrap().variant,
            backward.layer(0).unwrap().tile(cell).unwrap().variant,
            "cell {cell}"
        );
    }

    // A second pass changes nothing
    assert_eq!(resolve_all(&mut forward, &rules), 0);
}

const LEVEL: &str = r#"{
    "layer_list": [
        {
            "collision": true,
            "visible": true,
            "grid": {
                "16;8": { "world_element_type": "utils", "element": "player_spawner", "variance": 0, "pos": [16, 8] },
                "-2;9": { "world_element_type": "tiles", "element": "dirt", "variance": 3, "pos": [-2, 9] }
            },
            "off_grid": {
                "40;12": { "world_element_type": "decor", "element": "bush", "variance": 1, "pos": [40.5, 12.25] }
            }
        },
        {
            "collision": false,
            "visible": true,
            "grid": {},
            "off_grid": {}
        }
    ],
    "background_list": [],
    "borders": { "top": -1, "bottom": 20, "left": -3, "right": 40 }
}"#;

#[test]
fn test_level_round_trip() {
    let map = Tilemap::from_json("meadow", LEVEL).unwrap();
    assert_eq!(map.layer_count(), 2);
    assert_eq!(map.border, BorderRegion::new(-1, 20, -3, 40));
    assert!(!map.layer(1).unwrap().collision_enabled);
    assert_eq!(
        map.layer(0).unwrap().tile(Cell::new(-2, 9)).unwrap().variant,
        3
    );

    let saved = map.to_level_file();
    assert_eq!(saved, LevelFile::from_json(LEVEL).unwrap());

    let reloaded = Tilemap::from_level_file("meadow", &saved).unwrap();
    assert_eq!(reloaded.layers, map.layers);
    assert_eq!(reloaded.border, map.border);
}

#[test]
fn test_store_round_trip_and_template() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LevelStore::new(dir.path());

    let fresh = store.load("nowhere").unwrap();
    assert_eq!(fresh.border, BorderRegion::new(0, 16, 0, 32));
    assert_eq!(fresh.layer_count(), 1);
    assert!(store.list().unwrap().is_empty());

    let map = Tilemap::from_json("meadow", LEVEL).unwrap();
    store.save(&map).unwrap();
    let loaded = store.load("meadow").unwrap();
    assert_eq!(loaded.layers, map.layers);
    assert_eq!(loaded.border, map.border);
    assert_eq!(store.list().unwrap(), vec!["meadow".to_string()]);
}

#[test]
fn test_malformed_level_loads_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LevelStore::new(dir.path());
    let broken = LEVEL.replace("\"borders\"", "\"edges\"");
    std::fs::write(store.path_for("broken"), broken).unwrap();

    assert!(matches!(
        store.load("broken"),
        Err(LevelError::Schema {
            source: SchemaError::Json(_),
            ..
        })
    ));
}
