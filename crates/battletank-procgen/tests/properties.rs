//! Generator invariants over random seeds and levels.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use battletank_core::enums::ObstacleKind;
use battletank_core::types::{Field, GridPoint, Point};
use battletank_procgen::cluster::{grow_cluster, PlacementRules};
use battletank_procgen::generate_level;
use battletank_terrain::OccupancyGrid;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_cluster_stays_within_bounds(
        seed in any::<u64>(),
        cx in 2i32..38,
        cy in 2i32..18,
        radius in 1i32..8,
        size in 1usize..30,
    ) {
        let field = Field::default();
        let mut grid = OccupancyGrid::new(field);
        let rules = PlacementRules::new(field.default_player_start());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let center = Point::new(cx, cy);

        let placed = grow_cluster(&mut grid, &rules, center, radius, size, ObstacleKind::Brick, &mut rng);

        prop_assert!(placed <= size);
        prop_assert_eq!(grid.count(ObstacleKind::Brick), placed);
        for (p, _) in grid.obstacles() {
            prop_assert!(field.within_margin(p, 2));
            prop_assert!(p.chebyshev(center) <= radius);
            prop_assert!(p.chebyshev(rules.player_start) >= 2);
        }
    }

    #[test]
    fn prop_generated_levels_are_playable(seed in any::<u64>(), level in 1u32..12) {
        let field = Field::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let plan = generate_level(field, level, &mut rng);

        prop_assert!(plan.enemies.len() <= 15);
        for (p, _) in &plan.obstacles {
            prop_assert!(field.contains(*p));
            prop_assert!(p.chebyshev(plan.player_start) >= 2 || !field.is_interior(*p));
        }
        for enemy in &plan.enemies {
            prop_assert!(field.is_interior(enemy.position));
            prop_assert_eq!(plan.obstacle_at(enemy.position), None);
            prop_assert!(enemy.position != plan.player_start);
        }
        for x in 0..field.width {
            prop_assert_eq!(plan.obstacle_at(Point::new(x, 0)), Some(ObstacleKind::Steel));
        }
    }
}
