//! Time-bounded presentation cues owned by the player state.
//! Triggering an effect (re)starts its countdown; `tick` expires it.

use crate::types::Effect;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    remaining_ms: [f32; 4],
}

impl Effects {
    pub fn trigger(&mut self, effect: Effect) {
        self.remaining_ms[effect.index()] = effect.duration_ms();
    }

    pub fn is_active(&self, effect: Effect) -> bool {
        self.remaining_ms[effect.index()] > 0.0
    }

    pub fn remaining_ms(&self, effect: Effect) -> f32 {
        self.remaining_ms[effect.index()]
    }

    pub fn tick(&mut self, elapsed_ms: f32) {
        if !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return;
        }
        for remaining in &mut self.remaining_ms {
            *remaining = (*remaining - elapsed_ms).max(0.0);
        }
    }

    pub fn clear(&mut self) {
        self.remaining_ms = [0.0; 4];
    }

    pub fn any_active(&self) -> bool {
        Effect::ALL.iter().any(|effect| self.is_active(*effect))
    }
}
