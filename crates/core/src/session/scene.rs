//! Ordering of background images that complete independently of turns.

use super::*;

impl Session {
    /// Decide what to do with a finished scene request. `loaded` is whether
    /// an image actually arrived.
    pub fn resolve_scene(&mut self, ticket: SceneTicket, loaded: bool) -> SceneDecision {
        if ticket.epoch != self.epoch {
            return SceneDecision::Stale;
        }
        if self.boot_scene == Some(ticket) {
            self.boot_scene = None;
            if self.phase == Phase::Loading && self.pending_turn.is_none() {
                self.set_phase(Phase::Exploring);
            }
        }
        if !loaded {
            return SceneDecision::Keep;
        }
        if self.shown_scene_seq.is_some_and(|shown| shown >= ticket.seq) {
            log::debug!("dropping scene {} older than the one on screen", ticket.seq);
            return SceneDecision::Stale;
        }
        self.shown_scene_seq = Some(ticket.seq);
        SceneDecision::Show
    }

    pub fn is_booting(&self) -> bool {
        self.boot_scene.is_some()
    }
}
