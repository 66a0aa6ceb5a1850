//! Tests for the lighting system

use proptest::prelude::*;

use crate::{
    Grid, IntenseLight, IntenseLightConfig, LightingConfig, LightingError, OpaqueSet, Position,
    RayCaster, Shader, VisibilityAlgorithm, compute_visible, compute_visible_with, maps,
};

// Echo the terrain so the output shows exactly which cells were reached
fn echo(symbol: char, _distance: u32) -> Result<char, LightingError> {
    Ok(symbol)
}

#[test]
fn test_main() {
    crate::main();
}

#[test]
fn test_open_5x5_fully_visible() {
    let grid = Grid::filled(5, 5, '.').unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, Position::new(2, 2), &config, &echo).unwrap();
    assert!(!out.to_string().contains('?'), "unexpected gaps:\n{}", out);
}

#[test]
fn test_bordered_room() {
    let grid = Grid::from_rows(&["#####", "#...#", "#.@.#", "#...#", "#####"]).unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, Position::new(2, 2), &config, &echo).unwrap();

    // With 360 rays every wall, corners included, is struck by some ray
    assert_eq!(out, grid);

    let tiles = RayCaster::default().visible_tiles(&grid, Position::new(2, 2), &OpaqueSet::from("#"));
    for (col, row) in [(0, 0), (4, 0), (0, 4), (4, 4)] {
        let corner = Position::new(col, row);
        assert_eq!(tiles.distance_at(corner), Some(4), "corner {:?}", corner);
    }
    assert_eq!(tiles.distance_at(Position::new(2, 0)), Some(3));
    assert_eq!(tiles.distance_at(Position::new(0, 2)), Some(2));
}

#[test]
fn test_bordered_room_intense_light() {
    let grid = Grid::from_rows(&["#####", "#   #", "# @ #", "#   #", "#####"]).unwrap();
    let shader = IntenseLight::new(IntenseLightConfig::default()).unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, Position::new(2, 2), &config, &shader).unwrap();
    assert_eq!(
        out.rows(),
        vec!["&&&&&", "@;;;@", "@;@;@", "@;;;@", "&&&&&"]
    );
}

#[test]
fn test_horizontal_corridor_stops_at_wall() {
    let grid = Grid::from_rows(&[".........", "@....#...", "........."]).unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, Position::new(0, 1), &config, &echo).unwrap();
    assert_eq!(out.rows()[1], "@....#???");
}

#[test]
fn test_vertical_corridor_stops_at_wall() {
    // Wide enough that half-row vertical steps still reach the wall
    let grid = Grid::from_rows(&[
        ".......@.......",
        "...............",
        "...............",
        "...............",
        ".......#.......",
        "...............",
        "...............",
    ])
    .unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, Position::new(7, 0), &config, &echo).unwrap();
    let column: String = out.rows().iter().map(|row| row.chars().nth(7).unwrap()).collect();
    assert_eq!(column, "@...#??");
}

#[test]
fn test_open_grid_point_symmetry() {
    for (width, height) in [(7, 7), (9, 9), (11, 7), (21, 11)] {
        let grid = Grid::filled(width, height, '.').unwrap();
        let origin = Position::new(width / 2, height / 2);
        let tiles = RayCaster::default().visible_tiles(&grid, origin, &OpaqueSet::new());
        for (pos, _) in tiles.iter() {
            let mirror = Position::new(width - 1 - pos.col, height - 1 - pos.row);
            assert!(tiles.contains(mirror), "{:?} seen but not {:?}", pos, mirror);
        }
    }
}

#[test]
fn test_distances_along_axes() {
    let grid = Grid::filled(9, 9, '.').unwrap();
    let tiles = RayCaster::default().visible_tiles(&grid, Position::new(4, 4), &OpaqueSet::new());
    let row: Vec<u32> = (0..9).map(|c| tiles.distance_at(Position::new(c, 4)).unwrap()).collect();
    assert_eq!(row, vec![4, 3, 2, 1, 0, 1, 2, 3, 4]);
    // Vertical steps are half as long, so distances grow twice as fast
    let col: Vec<u32> = (0..9).map(|r| tiles.distance_at(Position::new(4, r)).unwrap()).collect();
    assert_eq!(col, vec![7, 6, 3, 2, 0, 2, 3, 6, 7]);
}

#[test]
fn test_distance_increases_along_each_ray() {
    let grid = Grid::filled(12, 8, '.').unwrap();
    let caster = RayCaster::new(36, 360.0);
    for index in 0..caster.ray_count {
        let path = caster.cast_ray(&grid, Position::new(5, 3), &OpaqueSet::new(), index);
        assert!(!path.is_empty());
        assert!(path.windows(2).all(|w| w[0].1 < w[1].1), "ray {}: {:?}", index, path);
    }
}

#[test]
fn test_input_grid_untouched() {
    let grid = maps::dungeon().unwrap();
    let before = grid.clone();
    let origin = maps::find_marker(&grid, '@').unwrap();
    let shader = IntenseLight::default();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, origin, &config, &shader).unwrap();
    assert_eq!(grid, before);
    assert_eq!((out.width(), out.height()), (grid.width(), grid.height()));
    assert_eq!(out.get(origin), Some('@'));
}

#[test]
fn test_dungeon_walls_hide_far_rooms() {
    let grid = maps::dungeon().unwrap();
    let origin = maps::find_marker(&grid, '@').unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let out = compute_visible(&grid, origin, &config, &echo).unwrap();
    let rows = out.rows();

    // The lit room and the wall above it
    assert_eq!(&rows[0][11..26], "###############");
    // Bottom-right room is behind two walls
    assert!(rows[9][24..39].chars().all(|c| c == '?'), "{}", rows[9]);
    // Looking down the doorway reaches the bottom wall
    assert_eq!(&rows[11][17..20], "###");
}

#[test]
fn test_out_of_bounds_origin() {
    let grid = Grid::filled(5, 4, '.').unwrap();
    let opaque = OpaqueSet::from("#");
    for (col, row) in [(-1, 0), (0, -1), (5, 0), (0, 4)] {
        let result = compute_visible_with(&grid, col, row, &opaque, &echo, '?', 360, 360.0);
        assert_eq!(
            result,
            Err(LightingError::OutOfBounds {
                col,
                row,
                width: 5,
                height: 4
            })
        );
    }

    let config = LightingConfig::default();
    assert!(matches!(
        compute_visible(&grid, Position::new(9, 9), &config, &echo),
        Err(LightingError::OutOfBounds { .. })
    ));
}

#[test]
fn test_invalid_parameters() {
    let grid = Grid::filled(3, 3, '.').unwrap();
    let opaque = OpaqueSet::new();
    assert!(matches!(
        compute_visible_with(&grid, 1, 1, &opaque, &echo, '?', 0, 360.0),
        Err(LightingError::InvalidParameter { name: "ray_count", .. })
    ));
    assert!(matches!(
        compute_visible_with(&grid, 1, 1, &opaque, &echo, '?', 360, 400.0),
        Err(LightingError::InvalidParameter {
            name: "field_of_view_degrees",
            ..
        })
    ));
}

#[test]
fn test_unrecognized_symbol_aborts() {
    let grid = Grid::from_rows(&["#####", "# x #", "# @ #", "#####"]).unwrap();
    let config = LightingConfig::default().with_opaque("#");
    let result = compute_visible(&grid, Position::new(2, 2), &config, &IntenseLight::default());
    assert!(matches!(
        result,
        Err(LightingError::UnrecognizedSymbol { symbol: 'x', .. })
    ));
}

#[test]
fn test_narrow_field_of_view() {
    // 90 degrees starting east covers the lower-right quadrant only
    let grid = Grid::filled(11, 11, '.').unwrap();
    let opaque = OpaqueSet::new();
    let out = compute_visible_with(&grid, 5, 5, &opaque, &echo, '?', 90, 90.0).unwrap();
    let rows = out.rows();
    assert_eq!(&rows[5][5..], "......");
    assert_eq!(&rows[5][..5], "?????");
    assert!(rows[0].chars().all(|c| c == '?'));
}

#[test]
fn test_distance_shading_uses_nearest_ray() {
    // Many rays cross cell (2, 0); the shader must see the smallest distance
    let grid = Grid::filled(7, 1, '.').unwrap();
    let shader = |_symbol: char, distance: u32| -> Result<char, LightingError> {
        Ok(char::from_digit(distance, 10).unwrap_or('+'))
    };
    let out = compute_visible_with(&grid, 3, 0, &OpaqueSet::new(), &shader, '?', 360, 360.0).unwrap();
    assert_eq!(out.to_string(), "3210123");
}

fn arb_scene() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
    (1usize..12, 1usize..12).prop_flat_map(|(width, height)| {
        (
            prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!['.', '#', 'o']), width)
                    .prop_map(|row| row.into_iter().collect::<String>()),
                height,
            ),
            0..width,
            0..height,
        )
    })
}

proptest! {
    #[test]
    fn prop_origin_always_visible(
        (rows, col, row) in arb_scene(),
        ray_count in 1u32..400,
        fov in 1u32..=360,
    ) {
        let grid = Grid::from_rows(&rows).unwrap();
        let config = LightingConfig::default()
            .with_opaque("#o")
            .with_ray_count(ray_count)
            .with_field_of_view(f64::from(fov));
        let out = compute_visible(&grid, Position::new(col, row), &config, &echo).unwrap();
        prop_assert_ne!(out.get(Position::new(col, row)), Some('?'));
    }

    #[test]
    fn prop_removing_opaque_symbol_only_adds_cells(
        (rows, col, row) in arb_scene(),
        ray_count in 1u32..400,
    ) {
        let grid = Grid::from_rows(&rows).unwrap();
        let origin = Position::new(col, row);
        let caster = RayCaster::new(ray_count, 360.0);
        let strict = caster.visible_tiles(&grid, origin, &OpaqueSet::from("#o"));
        let relaxed = caster.visible_tiles(&grid, origin, &OpaqueSet::from("#"));
        for (pos, _) in strict.iter() {
            prop_assert!(relaxed.contains(pos), "{:?} lost after removing 'o'", pos);
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(
        (rows, col, row) in arb_scene(),
        ray_count in 1u32..400,
    ) {
        let grid = Grid::from_rows(&rows).unwrap();
        let origin = Position::new(col, row);
        let opaque = OpaqueSet::from("#");
        let sequential = RayCaster::new(ray_count, 360.0);
        let parallel = sequential.clone().parallel(true);
        prop_assert_eq!(
            sequential.visible_tiles(&grid, origin, &opaque),
            parallel.visible_tiles(&grid, origin, &opaque)
        );
    }

    #[test]
    fn prop_shading_is_deterministic(
        symbol in prop::sample::select(vec!['#', ' ', '@', 'x']),
        distance in any::<u32>(),
    ) {
        let shader = IntenseLight::default();
        prop_assert_eq!(shader.shade(symbol, distance), shader.shade(symbol, distance));
    }
}
