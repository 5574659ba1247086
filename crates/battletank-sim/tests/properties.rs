//! Invariants that must hold after every tick, whatever the player does.

use std::collections::HashSet;

use proptest::prelude::*;

use battletank_core::commands::Command;
use battletank_core::enums::{Direction, GameState, ObstacleKind};
use battletank_core::state::GameStateSnapshot;
use battletank_sim::{BattleEngine, SimConfig};

fn command() -> impl Strategy<Value = Option<Command>> {
    prop_oneof![
        Just(None),
        Just(Some(Command::Fire)),
        prop::sample::select(Direction::ALL.to_vec())
            .prop_map(|direction| Some(Command::Move { direction })),
    ]
}

fn check_invariants(snap: &GameStateSnapshot) -> Result<(), TestCaseError> {
    for p in snap.positions() {
        prop_assert!(snap.field.contains(p), "entity outside the field at {p:?}");
    }

    let mut tanks = HashSet::new();
    let player = snap.player.iter().map(|p| p.tank.position);
    for p in player.chain(snap.enemies.iter().map(|t| t.position)) {
        prop_assert!(tanks.insert(p), "two tanks share {p:?}");
    }

    let shells: HashSet<_> = snap.projectiles.iter().map(|p| p.position).collect();
    for obstacle in &snap.obstacles {
        if obstacle.kind.blocks_projectiles() {
            prop_assert!(
                !shells.contains(&obstacle.position),
                "projectile left inside {:?} at {:?}",
                obstacle.kind,
                obstacle.position
            );
        }
        if obstacle.kind.blocks_tanks() {
            prop_assert!(
                !tanks.contains(&obstacle.position),
                "tank standing on {:?} at {:?}",
                obstacle.kind,
                obstacle.position
            );
        }
        if obstacle.kind == ObstacleKind::Steel {
            prop_assert_eq!(obstacle.health, 1);
        }
    }
    prop_assert_eq!(snap.enemy_count, snap.enemies.len());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_world_stays_consistent(
        seed in any::<u64>(),
        map in prop::option::of(0usize..3),
        commands in prop::collection::vec(command(), 1..150),
    ) {
        let mut engine = BattleEngine::new(SimConfig { seed, ..Default::default() });
        match map {
            Some(index) => engine.queue_command(Command::LoadMap { index }),
            None => engine.queue_command(Command::NewGame),
        }

        let mut lives = engine.player_stats().lives;
        let mut score = 0;
        for cmd in commands {
            if let Some(cmd) = cmd {
                engine.queue_command(cmd);
            }
            if engine.state() == GameState::LevelComplete {
                engine.queue_command(Command::NextLevel);
            }
            let snap = engine.tick();
            check_invariants(&snap)?;

            let stats = engine.player_stats();
            prop_assert!(stats.lives <= lives, "lives only go down during play");
            prop_assert!(stats.score >= score, "score never decreases");
            lives = stats.lives;
            score = stats.score;
        }
    }
}
