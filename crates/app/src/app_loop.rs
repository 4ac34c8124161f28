use std::sync::Arc;

use macroquad::prelude::KeyCode;
use zero_hour_core::{
    ContentEvent, ContentSource, Dispatcher, FireOutcome, FrameReport, Phase, PlayerAction,
    SceneDecision, SceneImage, Session, SessionError, TurnOutcome,
};

/// Keys bound to each explore action, checked in `PlayerAction::ALL` order.
pub const ACTION_BINDINGS: [(PlayerAction, [KeyCode; 2]); 4] = [
    (PlayerAction::MoveForward, [KeyCode::W, KeyCode::Up]),
    (PlayerAction::TurnLeft, [KeyCode::A, KeyCode::Left]),
    (PlayerAction::TurnRight, [KeyCode::D, KeyCode::Right]),
    (PlayerAction::Search, [KeyCode::S, KeyCode::Down]),
];
pub const FIRE_KEY: KeyCode = KeyCode::Space;
pub const RESTART_KEYS: [KeyCode; 2] = [KeyCode::R, KeyCode::Enter];

/// A click (or the fire key) aimed at a point on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub point: (f32, f32),
    pub viewport: (f32, f32),
}

impl Shot {
    /// Aim at the crosshair in the middle of the viewport.
    pub fn centered(viewport: (f32, f32)) -> Self {
        Self { point: (viewport.0 / 2.0, viewport.1 / 2.0), viewport }
    }
}

/// What happened during one frame, for the renderer and sound cues.
#[derive(Debug, Default)]
pub struct FrameUpdate {
    pub report: FrameReport,
    /// A newer scene image to swap in as the background.
    pub new_backdrop: Option<SceneImage>,
    pub fired: Option<FireOutcome>,
    pub rejected: Option<SessionError>,
    pub restarted: bool,
}

pub struct AppState {
    session: Session,
    dispatcher: Dispatcher,
}

impl AppState {
    /// Create the session and start loading the opening scene.
    pub fn start(seed: u64, source: Arc<dyn ContentSource>) -> Self {
        let mut session = Session::new(seed);
        let dispatcher = Dispatcher::new(source);
        dispatcher.request_scene(session.boot());
        log::info!("run started with seed {seed}");
        Self { session, dispatcher }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Process one frame: completed content, then input, then the clock.
    pub fn tick(&mut self, keys_pressed: &[KeyCode], shot: Option<Shot>, elapsed_ms: f32) -> FrameUpdate {
        let mut update = FrameUpdate::default();
        self.apply_content_events(&mut update);

        match self.session.phase() {
            Phase::Exploring | Phase::Loading => {
                if let Some(action) = pressed_action(keys_pressed) {
                    self.submit(action, &mut update);
                }
            }
            Phase::InCombat => {
                if let Some(shot) = shot {
                    match self.session.fire_at(shot.point, shot.viewport) {
                        Ok(outcome) => update.fired = Some(outcome),
                        Err(err) => update.rejected = Some(err),
                    }
                }
            }
            Phase::GameOver => {
                if keys_pressed.iter().any(|key| RESTART_KEYS.contains(key)) {
                    self.dispatcher.request_scene(self.session.restart());
                    update.restarted = true;
                }
            }
        }

        update.report = self.session.frame(elapsed_ms);
        update
    }

    fn submit(&mut self, action: PlayerAction, update: &mut FrameUpdate) {
        match self.session.submit_action(action) {
            Ok(request) => self.dispatcher.request_turn(request),
            Err(err) => {
                log::debug!("{action:?} ignored: {err}");
                update.rejected = Some(err);
            }
        }
    }

    fn apply_content_events(&mut self, update: &mut FrameUpdate) {
        for event in self.dispatcher.drain() {
            match event {
                ContentEvent::Turn { ticket, response } => {
                    if let TurnOutcome::Applied { scene: Some(scene), .. } =
                        self.session.apply_turn(ticket, response)
                    {
                        self.dispatcher.request_scene(scene);
                    }
                }
                ContentEvent::Scene { ticket, image } => {
                    let decision = self.session.resolve_scene(ticket, image.is_some());
                    if decision == SceneDecision::Show {
                        update.new_backdrop = image;
                    }
                }
            }
        }
    }
}

fn pressed_action(keys_pressed: &[KeyCode]) -> Option<PlayerAction> {
    ACTION_BINDINGS
        .iter()
        .find(|(_, keys)| keys.iter().any(|key| keys_pressed.contains(key)))
        .map(|(action, _)| *action)
}
