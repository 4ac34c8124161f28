//! Real-time combat for one encounter.
//! `Combat` owns the enemy set between spawn and teardown; submodules split
//! the per-frame advance, hit resolution and the clear-out lifecycle.

use crate::encounter::{EnemySet, SPAWN_SCALE};
use crate::types::{EnemyId, FireOutcome};

mod advance;
mod hit;
mod lifecycle;

#[cfg(test)]
mod tests;

/// Proximity gained per millisecond at speed 1.0.
pub const APPROACH_RATE_PER_MS: f32 = 0.00005;
pub const ATTACK_THRESHOLD: f32 = 1.5;
pub const PUSHBACK_SCALE: f32 = 0.5;
pub const ATTACK_DAMAGE: i32 = 15;
pub const KNOCKBACK: f32 = 0.1;
pub const MIN_SCALE: f32 = SPAWN_SCALE;
pub const SETTLE_DELAY_MS: f32 = 1000.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    /// An enemy crossed the attack threshold this frame.
    PlayerDamaged { by: EnemyId, amount: i32 },
    /// The set has been empty for the full settle delay. Emitted once.
    Cleared,
}

#[derive(Debug)]
pub struct Combat {
    enemies: EnemySet,
    settle_elapsed_ms: Option<f32>,
    cleared_signaled: bool,
    torn_down: bool,
}

impl Combat {
    pub fn new(enemies: EnemySet) -> Self {
        let settle_elapsed_ms = enemies.is_empty().then_some(0.0);
        Self { enemies, settle_elapsed_ms, cleared_signaled: false, torn_down: false }
    }

    pub fn enemies(&self) -> &EnemySet {
        &self.enemies
    }

    pub fn remaining(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_active(&self) -> bool {
        !self.torn_down
    }

    /// Stop the loop and drop the enemy set. No frame is processed afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.enemies.clear();
        self.settle_elapsed_ms = None;
    }

    #[cfg(test)]
    pub(crate) fn enemies_mut(&mut self) -> &mut EnemySet {
        &mut self.enemies
    }
}

fn sanitize_elapsed(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_finite() && elapsed_ms > 0.0 { elapsed_ms } else { 0.0 }
}
