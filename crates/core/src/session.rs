//! Game state controller: phase transitions, turn sequencing, and the
//! hand-off between exploration and combat.
//! Submodules split turn application, combat-phase input and scene ordering.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;

use crate::combat::Combat;
use crate::content::{TurnContext, TurnResponse};
use crate::encounter::{EnemySet, spawn_batch};
use crate::state::{PlayerState, STARTING_SCENE};
use crate::types::*;

mod combat_phase;
mod scene;
mod turn;

#[cfg(test)]
mod tests;

pub const AREA_CLEAR_LOG: &str = "Threat eliminated. Area clear.";

/// Identifies one turn submission. Responses carrying any other ticket are
/// discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TurnTicket {
    epoch: u64,
    seq: u64,
}

impl TurnTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneTicket {
    epoch: u64,
    seq: u64,
}

impl SceneTicket {
    pub fn seq(self) -> u64 {
        self.seq
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRequest {
    pub ticket: TurnTicket,
    pub action: String,
    pub context: TurnContext,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneRequest {
    pub ticket: SceneTicket,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("exploration is disabled during combat")]
    CombatInProgress,
    #[error("a turn is already being resolved")]
    TurnInFlight,
    #[error("the run is over")]
    GameOver,
    #[error("there is nothing to shoot at")]
    NotInCombat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Applied { entered_combat: bool, scene: Option<SceneRequest> },
    /// The response belonged to a superseded turn or session and was dropped.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneDecision {
    /// Swap the background to this image.
    Show,
    /// No image arrived; keep whatever is displayed.
    Keep,
    /// Superseded image or old session; ignore it.
    Stale,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub attacks: u32,
    pub damage_taken: i32,
    pub encounter_cleared: bool,
    pub died: bool,
}

pub struct Session {
    seed: u64,
    rng: ChaCha8Rng,
    epoch: u64,
    phase: Phase,
    player: PlayerState,
    combat: Option<Combat>,
    pending_turn: Option<TurnTicket>,
    next_turn_seq: u64,
    boot_scene: Option<SceneTicket>,
    next_scene_seq: u64,
    shown_scene_seq: Option<u64>,
    encounters_cleared: u32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            epoch: 0,
            phase: Phase::Exploring,
            player: PlayerState::default(),
            combat: None,
            pending_turn: None,
            next_turn_seq: 0,
            boot_scene: None,
            next_scene_seq: 0,
            shown_scene_seq: None,
            encounters_cleared: 0,
        }
    }

    /// Enter Loading while the opening scene is generated.
    pub fn boot(&mut self) -> SceneRequest {
        let request = self.issue_scene(STARTING_SCENE.to_string());
        self.boot_scene = Some(request.ticket);
        self.set_phase(Phase::Loading);
        request
    }

    /// Hard reset. Everything in flight from the previous run becomes stale.
    pub fn restart(&mut self) -> SceneRequest {
        if let Some(combat) = self.combat.as_mut() {
            combat.teardown();
        }
        let epoch = self.epoch + 1;
        let rng = self.rng.clone();
        *self = Self { epoch, rng, ..Self::new(self.seed) };
        log::info!("session restarted (epoch {epoch})");
        self.boot()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn combat(&self) -> Option<&Combat> {
        self.combat.as_ref()
    }

    pub fn enemies(&self) -> Option<&EnemySet> {
        self.combat.as_ref().map(Combat::enemies)
    }

    pub fn is_turn_pending(&self) -> bool {
        self.pending_turn.is_some()
    }

    pub fn has_shown_scene(&self) -> bool {
        self.shown_scene_seq.is_some()
    }

    pub fn encounters_cleared(&self) -> u32 {
        self.encounters_cleared
    }

    /// Whether explore-phase actions would currently be accepted.
    pub fn accepts_actions(&self) -> bool {
        self.phase == Phase::Exploring
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn issue_scene(&mut self, description: String) -> SceneRequest {
        let ticket = SceneTicket { epoch: self.epoch, seq: self.next_scene_seq };
        self.next_scene_seq += 1;
        SceneRequest { ticket, description }
    }

    fn enter_game_over(&mut self) {
        if let Some(mut combat) = self.combat.take() {
            combat.teardown();
        }
        self.pending_turn = None;
        self.set_phase(Phase::GameOver);
    }
}
