//! Simulation engine, the core of the game.
//!
//! `BattleEngine` owns the hecs ECS world, processes commands, runs all
//! systems, and produces `GameStateSnapshot`s. Completely headless
//! (no terminal or input dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use battletank_core::combat::CombatState;
use battletank_core::commands::Command;
use battletank_core::components::PlayerStats;
use battletank_core::constants::PLAYER_HEALTH;
use battletank_core::entity::Body;
use battletank_core::enums::*;
use battletank_core::events::GameEvent;
use battletank_core::state::GameStateSnapshot;
use battletank_core::types::{Field, Point};
use battletank_procgen::{generate_level, populate, LevelPlan, LevelSource, MapCatalog, MapLayout};

use crate::config::{ConfigError, SimConfig};
use crate::systems;
use crate::systems::enemy_ai::AiTick;
use crate::systems::player::PlayerAction;
use crate::systems::projectiles::HitTick;
use crate::systems::snapshot::SnapshotHeader;
use crate::world_setup::{self, ProjectileSpawn};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct BattleEngine {
    world: World,
    config: SimConfig,
    field: Field,
    state: GameState,
    level: u32,
    tick: u64,
    rng: ChaCha8Rng,
    player: Entity,
    /// Respawn cell of the current level.
    home: Point,
    level_source: LevelSource,
    catalog: MapCatalog,
    /// Built-in map the current game plays on; `None` means generated levels.
    current_map: Option<usize>,
    next_serial: u64,
    command_queue: VecDeque<Command>,
    pending_action: Option<PlayerAction>,
    damage_flash: u32,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl BattleEngine {
    /// Validate `config`, then build the engine as `new` does.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create an engine in the menu state with only the player spawned.
    /// No level is loaded until `new_game` or `load_level`.
    ///
    /// `config` is taken as is; use `try_new` or `SimConfig::from_json`
    /// for input that has not been validated.
    pub fn new(config: SimConfig) -> Self {
        let field = config.field();
        let mut world = World::new();
        let mut next_serial = 0;
        let home = field.default_player_start();
        let player = world_setup::spawn_player(
            &mut world,
            &mut next_serial,
            home,
            Direction::Up,
            config.starting_lives,
        );
        Self {
            world,
            field,
            state: GameState::default(),
            level: 1,
            tick: 0,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player,
            home,
            level_source: LevelSource::Generated,
            catalog: MapCatalog::builtin(),
            current_map: None,
            next_serial,
            command_queue: VecDeque::new(),
            pending_action: None,
            damage_flash: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: Command) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = Command>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.state == GameState::Playing {
            self.tick += 1;
            self.run_systems();
        }
        self.pending_action = None;

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current snapshot without advancing. Events stay buffered for the
    /// next tick.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(self.events.clone())
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Set the level number used by the next load without loading it.
    pub fn set_current_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Handle of the player's tank. Stable for the engine's lifetime.
    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn player_stats(&self) -> PlayerStats {
        self.world
            .get::<&PlayerStats>(self.player)
            .map(|s| *s)
            .unwrap_or(PlayerStats { score: 0, lives: 0 })
    }

    pub fn player_body(&self) -> Option<Body> {
        self.world.get::<&Body>(self.player).ok().map(|b| (*b).clone())
    }

    pub fn enemy_count(&self) -> usize {
        systems::progression::enemies_left(&self.world)
    }

    pub fn damage_flash_active(&self) -> bool {
        self.damage_flash > 0
    }

    /// Where the current level came from.
    pub fn level_source(&self) -> &LevelSource {
        &self.level_source
    }

    pub fn catalog(&self) -> &MapCatalog {
        &self.catalog
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- Player input ---

    /// Queue a move for the next tick. A later action in the same tick
    /// replaces it.
    pub fn player_move(&mut self, direction: Direction) {
        self.pending_action = Some(PlayerAction::Move(direction));
    }

    pub fn player_fire(&mut self) {
        self.pending_action = Some(PlayerAction::Fire);
    }

    // --- Level management ---

    /// Reset score, lives and health and start level 1 on the current
    /// level source.
    pub fn new_game(&mut self) {
        self.reset_player();
        self.load_level(1);
        self.state = GameState::Playing;
    }

    /// Load level `level` from the selected map, or generate it.
    pub fn load_level(&mut self, level: u32) {
        self.level = level.max(1);
        let plan = match self.current_map {
            Some(index) => {
                let populated = self.catalog.get(index).and_then(|map| {
                    populate(&map.layout, self.level, self.field, &mut self.rng)
                });
                match populated {
                    Ok(plan) => plan,
                    Err(err) => {
                        warn!(%err, index, "map unavailable, generating level instead");
                        generate_level(self.field, self.level, &mut self.rng)
                    }
                }
            }
            None => generate_level(self.field, self.level, &mut self.rng),
        };
        self.apply_plan(plan);
    }

    /// Populate the current level from an arbitrary layout. Falls back to
    /// a generated level when the layout does not fit the field. Returns
    /// where the loaded level came from.
    pub fn load_layout(&mut self, layout: &MapLayout) -> LevelSource {
        let plan = match populate(layout, self.level, self.field, &mut self.rng) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(%err, map = layout.name(), "layout rejected, generating level instead");
                generate_level(self.field, self.level, &mut self.rng)
            }
        };
        self.apply_plan(plan);
        self.level_source.clone()
    }

    /// Switch to built-in map `index` and start a new game on it. An
    /// unknown index plays generated levels instead.
    pub fn load_map(&mut self, index: usize) {
        self.current_map = match self.catalog.get(index) {
            Ok(_) => Some(index),
            Err(err) => {
                warn!(%err, "unknown map, using generated levels");
                None
            }
        };
        self.new_game();
    }

    fn apply_plan(&mut self, plan: LevelPlan) {
        world_setup::apply_plan(&mut self.world, &mut self.next_serial, self.player, &plan);
        if let Ok(mut combat) = self.world.get::<&mut CombatState>(self.player) {
            combat.reload_timer = 0;
            combat.follow_up_shot = None;
        }
        self.home = plan.player_start;
        self.pending_action = None;
        self.damage_flash = 0;
        info!(
            level = plan.level,
            source = ?plan.source,
            enemies = plan.enemies.len(),
            obstacles = plan.obstacles.len(),
            "level loaded"
        );
        self.level_source = plan.source;
    }

    fn reset_player(&mut self) {
        let lives = self.config.starting_lives;
        if let Ok((body, combat, stats)) =
            self.world
                .query_one_mut::<(&mut Body, &mut CombatState, &mut PlayerStats)>(self.player)
        {
            body.health = PLAYER_HEALTH;
            body.destroyed = false;
            body.settle();
            combat.clear_effects();
            combat.reload_timer = 0;
            *stats = PlayerStats { score: 0, lives };
        }
    }

    // --- Direct entity management ---

    pub fn add_obstacle(&mut self, position: Point, kind: ObstacleKind) -> Entity {
        world_setup::spawn_obstacle(&mut self.world, &mut self.next_serial, position, kind)
    }

    pub fn add_enemy(
        &mut self,
        position: Point,
        behavior: AiBehavior,
        tank_type: TankType,
    ) -> Entity {
        let spawn = battletank_procgen::EnemySpawn {
            position,
            behavior,
            tier: DifficultyTier::from_level(self.level),
            tank_type,
        };
        world_setup::spawn_enemy(&mut self.world, &mut self.next_serial, &spawn)
    }

    /// Add a projectile with no owner. It starts moving on the next tick.
    pub fn add_projectile(&mut self, position: Point, direction: Direction, damage: i32) -> Entity {
        let shot = ProjectileSpawn {
            position,
            direction,
            damage,
            owner: None,
            tick: self.tick,
            range: self.config.projectile_range,
        };
        world_setup::spawn_projectile(&mut self.world, &mut self.next_serial, shot)
    }

    pub fn add_bonus(&mut self, position: Point, kind: BonusKind) -> Entity {
        world_setup::spawn_bonus(&mut self.world, &mut self.next_serial, position, kind)
    }

    pub fn add_explosion(&mut self, position: Point) -> Entity {
        world_setup::spawn_explosion(&mut self.world, &mut self.next_serial, position)
    }

    /// Slow a tank for `ticks` ticks. Returns false if `tank` is not a tank.
    pub fn apply_slow(&mut self, tank: Entity, ticks: u32) -> bool {
        match self.world.get::<&mut CombatState>(tank) {
            Ok(mut combat) => {
                combat.apply_slow_effect(ticks);
                true
            }
            Err(_) => false,
        }
    }

    // --- Internal ---

    fn process_commands(&mut self) {
        while let Some(cmd) = self.command_queue.pop_front() {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Move { direction } => {
                if self.state == GameState::Playing {
                    self.player_move(direction);
                }
            }
            Command::Fire => {
                if self.state == GameState::Playing {
                    self.player_fire();
                }
            }
            Command::Pause => {
                if self.state == GameState::Playing {
                    self.state = GameState::Paused;
                }
            }
            Command::Resume => {
                if self.state == GameState::Paused {
                    self.state = GameState::Playing;
                }
            }
            Command::OpenMenu => {
                self.state = GameState::Menu;
            }
            Command::OpenSettings => {
                if matches!(self.state, GameState::Menu | GameState::Paused) {
                    self.state = GameState::Settings;
                }
            }
            Command::NewGame => {
                self.new_game();
            }
            Command::NextLevel => {
                if self.state == GameState::LevelComplete {
                    self.advance_level();
                }
            }
            Command::LoadMap { index } => {
                self.load_map(index);
            }
        }
    }

    fn advance_level(&mut self) {
        let next = self.level + 1;
        debug!(next, "advancing level");
        self.load_level(next);
        self.state = GameState::Playing;
    }

    /// Run all systems in the fixed per-tick order.
    fn run_systems(&mut self) {
        let player_position = self
            .world
            .get::<&Body>(self.player)
            .map(|b| b.position)
            .unwrap_or(self.home);

        // 1. Countdowns and projectile travel
        systems::timers::run(&mut self.world, self.tick, &mut self.damage_flash);

        // 2. Enemy decisions against the pre-tick player position
        systems::enemy_ai::run(
            &mut self.world,
            &AiTick {
                field: self.field,
                current_tick: self.tick,
                player_position,
                projectile_range: self.config.projectile_range,
            },
            &mut self.rng,
            &mut self.next_serial,
            &mut self.events,
        );

        // 3. Player action
        systems::player::run(
            &mut self.world,
            self.player,
            self.pending_action.take(),
            self.tick,
            self.config.projectile_range,
            &mut self.next_serial,
            &mut self.events,
        );

        // 4. Projectile hits
        systems::projectiles::run(
            &mut self.world,
            &HitTick {
                field: self.field,
                current_tick: self.tick,
                player: self.player,
            },
            &mut self.next_serial,
            &mut self.events,
            &mut self.damage_flash,
        );

        // 5. Bonus pickups
        systems::pickups::run(&mut self.world, self.player, &mut self.events);

        // 6-7. Undo illegal moves
        systems::collision::resolve_terrain(&mut self.world, self.field);
        systems::collision::resolve_tanks(&mut self.world);

        // 8. Remove destroyed entities
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        // 9. Death, respawn, game over, level complete
        if let Some(next) = systems::progression::run(
            &mut self.world,
            self.player,
            self.field,
            self.home,
            self.level,
            &mut self.events,
        ) {
            self.state = next;
            if next == GameState::LevelComplete && self.config.auto_advance {
                self.advance_level();
            }
            return;
        }

        // 10. Occasional bonus drop
        systems::bonus_spawner::run(
            &mut self.world,
            self.field,
            self.config.bonus_spawn_chance,
            &mut self.rng,
            &mut self.next_serial,
            &mut self.events,
        );
    }

    fn build_snapshot(&self, events: Vec<GameEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            self.player,
            SnapshotHeader {
                tick: self.tick,
                state: self.state,
                level: self.level,
                field: self.field,
                damage_flash: self.damage_flash_active(),
            },
            events,
        )
    }
}

impl Default for BattleEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
