//! Tank combat state: reload cycle and timed bonus effects.
//!
//! Embedded in both the player and enemy bundles. Every effect is a
//! countdown; it is active while its counter is non-zero, and applying it
//! again refreshes the counter instead of stacking.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BonusKind, Direction};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatState {
    /// Damage dealt by each projectile this tank fires.
    pub damage: i32,
    /// Ticks between shots.
    pub reload_time: u32,
    /// Ticks until the next shot is allowed.
    pub reload_timer: u32,
    pub shield_ticks: u32,
    pub double_fire_ticks: u32,
    pub speed_boost_ticks: u32,
    pub slow_ticks: u32,
    /// Second shell of a double-fire volley, released on the next tick.
    #[serde(default)]
    pub follow_up_shot: Option<Direction>,
}

impl CombatState {
    pub fn new(damage: i32, reload_time: u32) -> Self {
        Self {
            damage,
            reload_time,
            ..Default::default()
        }
    }

    pub fn has_shield(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn has_double_fire(&self) -> bool {
        self.double_fire_ticks > 0
    }

    pub fn has_speed_boost(&self) -> bool {
        self.speed_boost_ticks > 0
    }

    pub fn is_slowed(&self) -> bool {
        self.slow_ticks > 0
    }

    /// Apply a timed bonus. Returns false for kinds this state does not
    /// hold (`LifeUp` acts on health and is handled by the caller).
    pub fn apply_bonus(&mut self, kind: BonusKind) -> bool {
        match kind {
            BonusKind::Shield => self.shield_ticks = SHIELD_DURATION,
            BonusKind::DoubleFire => self.double_fire_ticks = DOUBLE_FIRE_DURATION,
            BonusKind::SpeedBoost => self.speed_boost_ticks = SPEED_BOOST_DURATION,
            BonusKind::LifeUp => return false,
        }
        true
    }

    pub fn apply_slow_effect(&mut self, duration: u32) {
        self.slow_ticks = duration;
    }

    /// Base speed adjusted by boost and slow, never below zero.
    pub fn effective_speed(&self, base_speed: i32) -> i32 {
        let mut speed = base_speed;
        if self.has_speed_boost() {
            speed += SPEED_BOOST_AMOUNT;
        }
        if self.is_slowed() {
            speed -= SLOW_AMOUNT;
        }
        speed.max(0)
    }

    /// Count every active effect down by one tick.
    pub fn update_bonus(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.double_fire_ticks = self.double_fire_ticks.saturating_sub(1);
        self.speed_boost_ticks = self.speed_boost_ticks.saturating_sub(1);
        self.slow_ticks = self.slow_ticks.saturating_sub(1);
    }

    pub fn reload(&mut self) {
        self.reload_timer = self.reload_timer.saturating_sub(1);
    }

    pub fn can_fire(&self) -> bool {
        self.reload_timer == 0
    }

    /// Start the reload cycle. Returns false if still reloading.
    pub fn fire(&mut self) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.reload_timer = self.reload_time;
        true
    }

    /// Projectiles released per successful `fire`.
    pub fn shots_per_fire(&self) -> usize {
        if self.has_double_fire() {
            2
        } else {
            1
        }
    }

    /// Hold the second shell of a volley fired in `direction`. The caller
    /// spawns the first shell itself.
    pub fn queue_follow_up(&mut self, direction: Direction) {
        if self.shots_per_fire() > 1 {
            self.follow_up_shot = Some(direction);
        }
    }

    pub fn take_follow_up(&mut self) -> Option<Direction> {
        self.follow_up_shot.take()
    }

    /// Damage that gets through the shield.
    pub fn absorb(&self, amount: i32) -> i32 {
        if self.has_shield() {
            0
        } else {
            amount
        }
    }

    /// Drop every timed effect (respawn).
    pub fn clear_effects(&mut self) {
        self.shield_ticks = 0;
        self.double_fire_ticks = 0;
        self.speed_boost_ticks = 0;
        self.slow_ticks = 0;
        self.follow_up_shot = None;
    }
}
