//! Behavior and difficulty profiles.
//!
//! Consolidates the tunable numbers the FSM reads: engagement distances
//! per behavior, fire chance, and aim error per difficulty tier.

use battletank_core::enums::{AiBehavior, DifficultyTier};

/// Chance that a RANDOM tank keeps driving straight instead of turning.
pub const RANDOM_FORWARD_PERCENT: u32 = 70;

/// Chance that a DEFENSIVE tank without a shot looks for cover.
pub const SEEK_COVER_PERCENT: u32 = 50;

/// Fire chance added per difficulty tier.
pub const FIRE_CHANCE_PER_TIER: u32 = 10;

/// Distance bands and odds for one behavior variant.
pub struct BehaviorProfile {
    /// Base fire chance in percent.
    pub fire_chance_base: u32,
    /// Back off when the player is this close or closer.
    pub retreat_within: i32,
    /// Duel from position out to this distance.
    pub engage_within: i32,
    /// Beyond this distance, charge.
    pub charge_beyond: i32,
    /// Chance to advance on each charging decision.
    pub charge_percent: u32,
    /// Chance to creep one cell closer between the engage and charge bands.
    pub approach_percent: u32,
}

pub fn behavior_profile(behavior: AiBehavior) -> BehaviorProfile {
    match behavior {
        AiBehavior::Random => BehaviorProfile {
            fire_chance_base: 30,
            retreat_within: 0,
            engage_within: 0,
            charge_beyond: i32::MAX,
            charge_percent: 0,
            approach_percent: 0,
        },
        AiBehavior::Aggressive => BehaviorProfile {
            fire_chance_base: 70,
            retreat_within: 3,
            engage_within: 6,
            charge_beyond: 6,
            charge_percent: 80,
            approach_percent: 0,
        },
        AiBehavior::Defensive => BehaviorProfile {
            fire_chance_base: 40,
            retreat_within: 2,
            engage_within: 5,
            charge_beyond: 8,
            charge_percent: 80,
            approach_percent: 33,
        },
    }
}

/// Percent chance to pull the trigger once a clear shot exists.
pub fn fire_chance(behavior: AiBehavior, tier: DifficultyTier) -> u32 {
    let base = behavior_profile(behavior).fire_chance_base;
    (base + FIRE_CHANCE_PER_TIER * tier.number()).clamp(0, 100)
}

/// Aim error at fire time.
pub struct AimProfile {
    /// Chance the shell goes in a uniformly random direction.
    pub wild_shot_percent: u32,
    /// Chance the shell goes 90 degrees off target.
    pub deviation_percent: u32,
}

pub fn aim_profile(tier: DifficultyTier) -> AimProfile {
    match tier {
        DifficultyTier::Rookie => AimProfile {
            wild_shot_percent: 33,
            deviation_percent: 0,
        },
        DifficultyTier::Regular => AimProfile {
            wild_shot_percent: 0,
            deviation_percent: 20,
        },
        DifficultyTier::Elite => AimProfile {
            wild_shot_percent: 0,
            deviation_percent: 0,
        },
    }
}
