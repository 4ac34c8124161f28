//! Turn submission and atomic application of a content response.

use super::*;

impl Session {
    pub fn submit_action(&mut self, action: PlayerAction) -> Result<TurnRequest, SessionError> {
        self.submit_text(action.prompt())
    }

    /// Submit a free-form action. Only one turn may be in flight at a time.
    pub fn submit_text(&mut self, action: &str) -> Result<TurnRequest, SessionError> {
        match self.phase {
            Phase::GameOver => return Err(SessionError::GameOver),
            Phase::InCombat => return Err(SessionError::CombatInProgress),
            Phase::Loading => return Err(SessionError::TurnInFlight),
            Phase::Exploring => {}
        }

        let ticket = TurnTicket { epoch: self.epoch, seq: self.next_turn_seq };
        self.next_turn_seq += 1;
        self.pending_turn = Some(ticket);
        self.set_phase(Phase::Loading);
        log::debug!("turn {} submitted: {action}", ticket.seq);

        Ok(TurnRequest {
            ticket,
            action: action.to_string(),
            context: TurnContext::capture(&self.player),
        })
    }

    /// Apply a resolved turn in one step. Responses for anything but the
    /// pending ticket are dropped.
    pub fn apply_turn(&mut self, ticket: TurnTicket, response: TurnResponse) -> TurnOutcome {
        if ticket.epoch != self.epoch || self.pending_turn != Some(ticket) {
            log::info!("dropping stale turn response (seq {}, epoch {})", ticket.seq, ticket.epoch);
            return TurnOutcome::Stale;
        }
        self.pending_turn = None;

        let TurnResponse { narrative, visual_prompt, encounter: _, state_update } = &response;
        let player = &mut self.player;
        if let Some(delta) = state_update.health_change {
            player.apply_health_change(delta);
        }
        if let Some(delta) = state_update.ammo_change {
            player.apply_ammo_change(delta);
        }
        if let Some(location) = state_update.location.as_deref().filter(|l| !l.trim().is_empty()) {
            player.location = location.to_string();
        }
        if let Some(item) = state_update.item_found.clone() {
            player.add_item(item);
        }
        if !visual_prompt.trim().is_empty() {
            player.visual_description = visual_prompt.clone();
        }
        player.last_log = narrative.clone();

        let scene = (!visual_prompt.trim().is_empty()).then(|| self.issue_scene(visual_prompt.clone()));

        if self.player.is_dead() {
            self.enter_game_over();
            return TurnOutcome::Applied { entered_combat: false, scene };
        }

        let entered_combat = match response.encounter_spec() {
            Some(spec) => {
                let enemies = spawn_batch(spec, &mut self.rng);
                log::info!("encounter: {} x {:?}", enemies.len(), spec.kind);
                self.combat = Some(Combat::new(enemies));
                self.set_phase(Phase::InCombat);
                true
            }
            None => {
                self.set_phase(Phase::Exploring);
                false
            }
        };
        TurnOutcome::Applied { entered_combat, scene }
    }
}
