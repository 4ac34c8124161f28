//! Per-frame proximity update and attack triggering.

use super::*;

impl Combat {
    /// Advance every enemy by `elapsed_ms` of wall-clock time. An enemy that
    /// reaches the attack threshold damages the player once and is pushed
    /// back to mid range in the same frame, so a crossing is never counted
    /// twice.
    pub fn advance(&mut self, elapsed_ms: f32) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        let elapsed_ms = sanitize_elapsed(elapsed_ms);

        for (id, enemy) in self.enemies.iter_mut() {
            let next_scale = enemy.scale + APPROACH_RATE_PER_MS * enemy.speed * elapsed_ms;
            if next_scale >= ATTACK_THRESHOLD {
                events.push(CombatEvent::PlayerDamaged { by: id, amount: ATTACK_DAMAGE });
                enemy.scale = PUSHBACK_SCALE;
            } else {
                enemy.scale = next_scale;
            }
        }

        if let Some(cleared) = self.tick_settle(elapsed_ms) {
            events.push(cleared);
        }
        events
    }
}
