//! Shot resolution against the live enemy set. Ammo is the caller's concern;
//! by the time a shot reaches here a round has already been spent.

use super::*;

impl Combat {
    pub fn resolve_shot(&mut self, target: Option<EnemyId>) -> FireOutcome {
        let Some(target) = target else {
            return FireOutcome::Miss;
        };
        let Some(enemy) = self.enemies.get_mut(target) else {
            return FireOutcome::Stale { target };
        };

        enemy.hp -= 1;
        if enemy.hp <= 0 {
            self.enemies.remove(target);
            log::debug!("enemy down, {} remaining", self.enemies.len());
            self.start_settle_if_empty();
            return FireOutcome::Killed { target };
        }

        enemy.scale = (enemy.scale - KNOCKBACK).max(MIN_SCALE);
        FireOutcome::Hit { target, remaining_hp: enemy.hp }
    }
}
