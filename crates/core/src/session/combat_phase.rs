//! Combat-phase input and the per-frame tick.

use super::*;
use crate::combat::CombatEvent;
use crate::encounter::pick_target;

impl Session {
    /// Fire at `target`, or into the background when `None`.
    pub fn fire(&mut self, target: Option<EnemyId>) -> Result<FireOutcome, SessionError> {
        if self.phase != Phase::InCombat {
            return Err(if self.phase == Phase::GameOver {
                SessionError::GameOver
            } else {
                SessionError::NotInCombat
            });
        }
        let Some(combat) = self.combat.as_mut() else {
            return Err(SessionError::NotInCombat);
        };
        if !self.player.spend_round() {
            return Ok(FireOutcome::DryFire);
        }
        Ok(combat.resolve_shot(target))
    }

    /// Fire at whatever is under `point` (pixels) in a viewport of the given size.
    pub fn fire_at(
        &mut self,
        point: (f32, f32),
        viewport: (f32, f32),
    ) -> Result<FireOutcome, SessionError> {
        let target = self.enemies().and_then(|enemies| pick_target(enemies, point, viewport));
        self.fire(target)
    }

    /// Advance effects and, during combat, the enemy approach.
    pub fn frame(&mut self, elapsed_ms: f32) -> FrameReport {
        let mut report = FrameReport::default();
        self.player.effects.tick(elapsed_ms);

        if self.phase != Phase::InCombat {
            return report;
        }
        let Some(combat) = self.combat.as_mut() else {
            return report;
        };

        for event in combat.advance(elapsed_ms) {
            match event {
                CombatEvent::PlayerDamaged { amount, .. } => {
                    self.player.take_damage(amount);
                    report.attacks += 1;
                    report.damage_taken += amount;
                    if self.player.is_dead() {
                        report.died = true;
                        self.enter_game_over();
                        return report;
                    }
                }
                CombatEvent::Cleared => {
                    report.encounter_cleared = true;
                    self.finish_encounter();
                    return report;
                }
            }
        }
        report
    }

    fn finish_encounter(&mut self) {
        if let Some(mut combat) = self.combat.take() {
            combat.teardown();
        }
        self.encounters_cleared += 1;
        self.player.last_log = AREA_CLEAR_LOG.to_string();
        self.set_phase(Phase::Exploring);
    }
}
