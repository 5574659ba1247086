//! Simulation constants and tuning parameters.

// --- Field ---

/// Default field width in cells.
pub const DEFAULT_FIELD_WIDTH: i32 = 40;

/// Default field height in cells.
pub const DEFAULT_FIELD_HEIGHT: i32 = 20;

// --- Player ---

pub const PLAYER_HEALTH: i32 = 3;
pub const PLAYER_LIVES: u32 = 3;
pub const PLAYER_SPEED: i32 = 1;
pub const PLAYER_DAMAGE: i32 = 1;
pub const PLAYER_RELOAD_TICKS: u32 = 2;

// --- Enemies ---

pub const ENEMY_RELOAD_TICKS: u32 = 3;

/// Hard cap on enemies per level.
pub const MAX_ENEMIES: usize = 15;

/// Extra enemies added per level above the first.
pub const ENEMIES_PER_LEVEL: usize = 2;

/// Ticks between AI decisions once a decision has been made.
pub const AI_DECISION_COOLDOWN: u32 = 1;

// --- Obstacles ---

pub const BRICK_HEALTH: i32 = 1;

// --- Bonuses (durations in ticks) ---

pub const SHIELD_DURATION: u32 = 10;
pub const DOUBLE_FIRE_DURATION: u32 = 15;
pub const SPEED_BOOST_DURATION: u32 = 20;

/// Effective speed added by an active speed boost.
pub const SPEED_BOOST_AMOUNT: i32 = 1;

/// Effective speed removed by an active slow effect.
pub const SLOW_AMOUNT: i32 = 1;

/// Per-tick bonus spawn chance, in percent.
pub const BONUS_SPAWN_CHANCE_PERCENT: u32 = 5;

/// Random cells tried before a bonus spawn is skipped for the tick.
pub const BONUS_SPAWN_ATTEMPTS: u32 = 32;

// --- Projectiles / effects ---

/// Ticks a projectile survives after its creation tick.
pub const PROJECTILE_RANGE: u32 = 1;

pub const EXPLOSION_LIFETIME: u32 = 1;

/// Ticks the damage flash stays lit after the player is hit.
pub const DAMAGE_FLASH_TICKS: u32 = 3;

// --- Scoring ---

pub const SCORE_ENEMY_KILL: u64 = 100;
pub const SCORE_BONUS_PICKUP: u64 = 50;
