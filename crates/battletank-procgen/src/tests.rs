#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use battletank_core::enums::*;
    use battletank_core::types::{Field, GridPoint, Point};
    use battletank_terrain::OccupancyGrid;

    use crate::cluster::{grow_cluster, organic_wall, PlacementRules};
    use crate::difficulty::DifficultyParams;
    use crate::generator::{build_boundary, generate_level, interior_count};
    use crate::layout::{MapError, MapLayout};
    use crate::maps::MapCatalog;
    use crate::plan::LevelSource;
    use crate::population::{enemy_count, populate, roll_behavior, roll_tank_type};

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    /// A 40x20 steel-walled layout with extra symbols drawn in.
    fn walled(extra: &[(usize, usize, char)]) -> MapLayout {
        let mut rows = vec![vec![' '; 40]; 20];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == 39 || y == 19 {
                    *cell = 'X';
                }
            }
        }
        for &(x, y, c) in extra {
            rows[y][x] = c;
        }
        let rows: Vec<String> = rows.into_iter().map(|r| r.into_iter().collect()).collect();
        MapLayout::from_rows("test", &rows).unwrap()
    }

    // ---- Organic clusters ----

    #[test]
    fn test_cluster_reproducible_for_seed() {
        let field = Field::default();
        let rules = PlacementRules::new(field.default_player_start());
        let grow = |seed| {
            let mut grid = OccupancyGrid::new(field);
            let placed = grow_cluster(
                &mut grid,
                &rules,
                Point::new(12, 8),
                4,
                12,
                ObstacleKind::Brick,
                &mut rng(seed),
            );
            (placed, grid.obstacles().collect::<Vec<_>>())
        };
        assert_eq!(grow(99), grow(99));
        assert_ne!(grow(1).1, grow(2).1, "different seeds should differ");
    }

    #[test]
    fn test_cluster_reaches_requested_size() {
        let field = Field::default();
        let rules = PlacementRules::new(field.default_player_start());
        let mut exact = 0;
        for seed in 0..20 {
            let mut grid = OccupancyGrid::new(field);
            let placed = grow_cluster(
                &mut grid,
                &rules,
                Point::new(15, 8),
                8,
                10,
                ObstacleKind::Forest,
                &mut rng(seed),
            );
            assert!(placed <= 10);
            assert_eq!(placed, grid.count(ObstacleKind::Forest));
            if placed == 10 {
                exact += 1;
            }
        }
        assert!(exact >= 18, "only {exact}/20 clusters reached full size");
    }

    #[test]
    fn test_cluster_respects_radius_and_clearances() {
        let field = Field::default();
        let start = field.default_player_start();
        let rules = PlacementRules::new(start);
        let center = Point::new(start.x, start.y - 3);
        let mut grid = OccupancyGrid::new(field);
        grow_cluster(&mut grid, &rules, center, 5, 40, ObstacleKind::Water, &mut rng(4));

        for (p, _) in grid.obstacles() {
            let d = (p - center).as_dvec2().length();
            assert!(d <= 5.0, "{p} outside radius");
            assert!(field.within_margin(p, 2), "{p} too close to the edge");
            assert!(p.chebyshev(start) >= 2, "{p} crowds the player start");
        }
    }

    #[test]
    fn test_cluster_invalid_center_places_nothing() {
        let field = Field::default();
        let rules = PlacementRules::new(field.default_player_start());
        let mut grid = OccupancyGrid::new(field);
        let placed = grow_cluster(
            &mut grid,
            &rules,
            Point::new(1, 1),
            4,
            10,
            ObstacleKind::Brick,
            &mut rng(0),
        );
        assert_eq!(placed, 0);
    }

    #[test]
    fn test_organic_wall_budget_and_orientation() {
        let field = Field::default();
        let rules = PlacementRules::new(Point::new(20, 17));
        let mut grid = OccupancyGrid::new(field);
        let placed = organic_wall(
            &mut grid,
            &rules,
            Point::new(5, 6),
            Point::new(15, 6),
            1,
            ObstacleKind::Brick,
            12,
            &mut rng(8),
        );
        assert!(placed <= 12);
        for (p, _) in grid.obstacles() {
            assert!((5..=7).contains(&p.y) && (5..=15).contains(&p.x), "{p} off the wall");
        }
    }

    // ---- Difficulty ----

    #[test]
    fn test_difficulty_unlocks() {
        let field = Field::default();
        let l1 = DifficultyParams::for_level(1, field);
        assert_eq!(l1.steel.clusters, 0);
        assert!(!l1.defensive_wall && !l1.fortresses && !l1.winding_paths);

        let l3 = DifficultyParams::for_level(3, field);
        assert!(l3.steel.clusters > 0);
        assert!(l3.defensive_wall && !l3.fortresses);

        let l6 = DifficultyParams::for_level(6, field);
        assert!(l6.fortresses && l6.fortress_cores && l6.player_cover && l6.winding_paths);
        assert!(l6.brick.shape.size > l1.brick.shape.size);
        assert!(l6.brick.target > l1.brick.target);
    }

    #[test]
    fn test_difficulty_caps_small_fields() {
        let params = DifficultyParams::for_level(30, Field::new(12, 10));
        // 8x6 placeable cells.
        assert!(params.brick.target <= 48 * 15 / 100);
        assert!(params.forest.target <= 48 * 8 / 100);
    }

    // ---- Generator ----

    #[test]
    fn test_generate_deterministic() {
        let a = generate_level(Field::default(), 4, &mut rng(2024));
        let b = generate_level(Field::default(), 4, &mut rng(2024));
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.source, LevelSource::Generated);
    }

    #[test]
    fn test_generate_boundary_and_player_area() {
        let field = Field::default();
        for level in 1..=8 {
            let plan = generate_level(field, level, &mut rng(level as u64));
            for p in field.cells().filter(|p| !field.is_interior(*p)) {
                assert_eq!(plan.obstacle_at(p), Some(ObstacleKind::Steel), "level {level}: {p}");
            }
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let p = plan.player_start + Point::new(dx, dy);
                    assert_eq!(plan.obstacle_at(p), None, "level {level}: {p} next to player");
                }
            }
        }
    }

    #[test]
    fn test_generate_keeps_path_nodes_open() {
        let field = Field::default();
        let plan = generate_level(field, 2, &mut rng(31));
        for x in (3..field.width - 3).step_by(6) {
            for y in (3..field.height - 3).step_by(2) {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let p = Point::new(x + dx, y + dy);
                        let kind = plan.obstacle_at(p);
                        assert!(
                            kind.is_none() || kind == Some(ObstacleKind::Steel),
                            "path cell {p} blocked by {kind:?}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_generate_meets_quotas() {
        let field = Field::default();
        let plan = generate_level(field, 1, &mut rng(5));
        let mut grid = OccupancyGrid::new(field);
        for &(p, k) in &plan.obstacles {
            grid.set_obstacle(p, Some(k));
        }
        let params = DifficultyParams::for_level(1, field);
        for kind in ObstacleKind::ALL {
            assert_eq!(
                interior_count(&grid, kind),
                params.budget(kind).target,
                "{kind:?} quota"
            );
        }
    }

    #[test]
    fn test_generate_enemies() {
        let field = Field::default();
        for level in [1, 5, 20] {
            let plan = generate_level(field, level, &mut rng(77));
            let expected = (3 + level as usize).min(15);
            assert_eq!(plan.enemies.len(), expected, "level {level}");
            let mut seen = HashSet::new();
            for e in &plan.enemies {
                assert!(e.position.y < field.height / 2);
                assert_eq!(plan.obstacle_at(e.position), None);
                assert!(seen.insert(e.position), "stacked enemies at {}", e.position);
                assert_eq!(e.tier, DifficultyTier::from_level(level));
            }
        }
    }

    #[test]
    fn test_boundary_builder() {
        let mut grid = OccupancyGrid::new(Field::new(6, 4));
        build_boundary(&mut grid);
        assert_eq!(grid.count(ObstacleKind::Steel), 16);
        assert!(grid.is_empty(Point::new(2, 2)));
    }

    // ---- Layout ----

    #[test]
    fn test_layout_parse_errors() {
        assert_eq!(MapLayout::parse("e", ""), Err(MapError::Empty));
        assert!(matches!(
            MapLayout::parse("r", "XXX\nX X\nXX\n"),
            Err(MapError::RaggedRow { row: 2, expected: 3, found: 2 })
        ));
        assert!(matches!(
            MapLayout::parse("u", "XXX\nX?X\nXXX"),
            Err(MapError::UnknownSymbol { symbol: '?', x: 1, y: 1 })
        ));
    }

    #[test]
    fn test_layout_markers() {
        let layout = MapLayout::parse("m", "XXXXX\nXE *X\nX #<X\nXXXXX\n").unwrap();
        assert_eq!(layout.field(), Field::new(5, 4));
        assert_eq!(layout.enemy_markers(), vec![Point::new(1, 1)]);
        assert_eq!(layout.player_marker(), Some((Point::new(3, 2), Direction::Left)));
        assert_eq!(layout.symbol_at(Point::new(3, 1)), Some('*'));
        assert_eq!(layout.symbol_at(Point::new(9, 9)), None);
    }

    // ---- Population ----

    #[test]
    fn test_enemy_count_formula() {
        assert_eq!(enemy_count(3, 1), 3);
        assert_eq!(enemy_count(3, 4), 9);
        assert_eq!(enemy_count(3, 10), 15);
        assert_eq!(enemy_count(20, 1), 15);
    }

    #[test]
    fn test_populate_level_one_uses_markers() {
        let layout = walled(&[(10, 3, 'E'), (30, 3, 'E'), (5, 10, 'E')]);
        let plan = populate(&layout, 1, Field::default(), &mut rng(1)).unwrap();
        let cells: Vec<Point> = plan.enemies.iter().map(|e| e.position).collect();
        assert_eq!(cells, vec![Point::new(10, 3), Point::new(30, 3), Point::new(5, 10)]);
        assert!(plan.enemies.iter().all(|e| e.tank_type == TankType::Basic));
        assert!(plan.enemies.iter().all(|e| e.tier == DifficultyTier::Rookie));
    }

    #[test]
    fn test_populate_level_four_adds_enemies() {
        let layout = walled(&[(10, 3, 'E'), (30, 3, 'E'), (5, 10, 'E'), (12, 12, '#')]);
        let plan = populate(&layout, 4, Field::default(), &mut rng(9)).unwrap();
        assert_eq!(plan.enemies.len(), 9);

        let player = plan.player_start;
        let mut seen = HashSet::new();
        for e in &plan.enemies[3..] {
            let p = e.position;
            assert!(seen.insert(p));
            assert!(p.x != player.x && p.y != player.y, "{p} in the player corridor");
            assert!(p.manhattan(player) > 5, "{p} too close");
            assert!(Field::default().is_interior(p));
            assert_ne!(p, Point::new(12, 12), "spawned on brick");
        }
    }

    #[test]
    fn test_populate_player_marker_and_obstacles() {
        let layout = walled(&[(7, 15, '>'), (8, 8, '#'), (9, 8, '~'), (10, 8, '*'), (20, 4, 'E')]);
        let plan = populate(&layout, 1, Field::default(), &mut rng(3)).unwrap();
        assert_eq!(plan.player_start, Point::new(7, 15));
        assert_eq!(plan.player_facing, Direction::Right);
        assert_eq!(plan.obstacle_at(Point::new(8, 8)), Some(ObstacleKind::Brick));
        assert_eq!(plan.obstacle_at(Point::new(9, 8)), Some(ObstacleKind::Water));
        assert_eq!(plan.obstacle_at(Point::new(10, 8)), Some(ObstacleKind::Forest));
        assert_eq!(plan.obstacle_at(Point::new(20, 4)), None);
        assert_eq!(plan.obstacle_count(ObstacleKind::Steel), 116);
    }

    #[test]
    fn test_populate_without_player_marker_uses_default_start() {
        let layout = walled(&[(20, 4, 'E')]);
        let plan = populate(&layout, 2, Field::default(), &mut rng(3)).unwrap();
        assert_eq!(plan.player_start, Field::default().default_player_start());
        assert_eq!(plan.player_facing, Direction::Up);
    }

    #[test]
    fn test_populate_rejects_wrong_dimensions() {
        let layout = MapLayout::parse("small", "XXXX\nX  X\nXXXX").unwrap();
        let err = populate(&layout, 1, Field::default(), &mut rng(0)).unwrap_err();
        assert!(matches!(err, MapError::DimensionMismatch { width: 40, height: 20, .. }));
    }

    #[test]
    fn test_populate_spawns_fewer_when_cramped() {
        let rows = [
            "XXXXXXXXXXXX",
            "X##########X",
            "X##########X",
            "X###  #####X",
            "X##########X",
            "X##########X",
            "X#####^####X",
            "XXXXXXXXXXXX",
        ];
        let layout = MapLayout::from_rows("cramped", &rows).unwrap();
        let plan = populate(&layout, 3, Field::new(12, 8), &mut rng(0)).unwrap();
        let cells: HashSet<Point> = plan.enemies.iter().map(|e| e.position).collect();
        assert_eq!(plan.enemies.len(), 2);
        assert_eq!(cells, HashSet::from([Point::new(4, 3), Point::new(5, 3)]));
    }

    #[test]
    fn test_behavior_mix_by_tier() {
        let mut r = rng(12);
        let aggressive = |tier, r: &mut ChaCha8Rng| {
            (0..2000)
                .filter(|_| roll_behavior(tier, r) == AiBehavior::Aggressive)
                .count()
        };
        let rookie = aggressive(DifficultyTier::Rookie, &mut r);
        let elite = aggressive(DifficultyTier::Elite, &mut r);
        assert!(elite > rookie * 3, "elite {elite} vs rookie {rookie}");
    }

    #[test]
    fn test_tank_types_gated_by_level() {
        let mut r = rng(6);
        let early: HashSet<TankType> = (0..500).map(|_| roll_tank_type(3, &mut r)).collect();
        assert!(!early.contains(&TankType::Armored));
        assert!(early.contains(&TankType::Fast));
        let late: HashSet<TankType> = (0..500).map(|_| roll_tank_type(5, &mut r)).collect();
        assert_eq!(late.len(), 4);
    }

    // ---- Catalog ----

    #[test]
    fn test_builtin_catalog() {
        let catalog = MapCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        let names: Vec<&str> = catalog.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["classic", "fortress", "battlefield"]);
        let markers: Vec<usize> = catalog
            .iter()
            .map(|m| m.layout.enemy_markers().len())
            .collect();
        assert_eq!(markers, vec![2, 2, 4]);
        for map in catalog.iter() {
            assert_eq!(map.layout.field(), Field::default());
        }
        assert!(matches!(
            catalog.get(7),
            Err(MapError::UnknownMap { index: 7, available: 3 })
        ));
    }

    #[test]
    fn test_builtin_maps_populate() {
        let catalog = MapCatalog::builtin();
        for map in catalog.iter() {
            let plan = populate(&map.layout, 2, Field::default(), &mut rng(0)).unwrap();
            assert_eq!(plan.enemies.len(), map.layout.enemy_markers().len() + 2, "{}", map.name);
            assert_eq!(
                plan.source,
                LevelSource::Map {
                    name: map.name.to_string()
                }
            );
        }
    }
}
