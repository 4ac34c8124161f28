//! Encounter completion: once the set is empty, wait out the settle delay and
//! report `Cleared` exactly once.

use super::*;

impl Combat {
    pub fn is_cleared(&self) -> bool {
        self.cleared_signaled
    }

    pub fn settling(&self) -> bool {
        self.settle_elapsed_ms.is_some() && !self.cleared_signaled
    }

    pub(super) fn start_settle_if_empty(&mut self) {
        if self.enemies.is_empty() && self.settle_elapsed_ms.is_none() {
            self.settle_elapsed_ms = Some(0.0);
        }
    }

    pub(super) fn tick_settle(&mut self, elapsed_ms: f32) -> Option<CombatEvent> {
        if self.cleared_signaled || !self.enemies.is_empty() {
            return None;
        }
        let waited = self.settle_elapsed_ms.get_or_insert(0.0);
        *waited += elapsed_ms;
        if *waited < SETTLE_DELAY_MS {
            return None;
        }
        self.cleared_signaled = true;
        log::info!("encounter cleared after {waited:.0}ms settle");
        Some(CombatEvent::Cleared)
    }
}
