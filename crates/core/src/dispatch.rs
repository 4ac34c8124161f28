//! Runs content-source calls off the frame thread.
//!
//! Each request gets its own worker thread; completions are queued on an
//! mpsc channel and drained by the frame loop without blocking. Turn
//! failures arrive as the fallback response and image failures as `None`,
//! so the session never sees a transport error.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::content::{
    ContentSource, SceneImage, TurnResponse, resolve_turn_or_fallback, scene_image_or_none,
};
use crate::session::{SceneRequest, SceneTicket, TurnRequest, TurnTicket};

#[derive(Debug)]
pub enum ContentEvent {
    Turn { ticket: TurnTicket, response: TurnResponse },
    Scene { ticket: SceneTicket, image: Option<SceneImage> },
}

pub struct Dispatcher {
    source: Arc<dyn ContentSource>,
    tx: Sender<ContentEvent>,
    rx: Receiver<ContentEvent>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { source, tx, rx }
    }

    pub fn request_turn(&self, request: TurnRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let ticket = request.ticket;
        let spawned = thread::Builder::new().name("content-turn".to_string()).spawn(move || {
            let response = resolve_turn_or_fallback(source.as_ref(), &request.action, &request.context);
            // The receiver is gone only when the game is shutting down.
            let _ = tx.send(ContentEvent::Turn { ticket, response });
        });
        if let Err(err) = spawned {
            log::warn!("could not start turn worker: {err}");
            // Our own receiver is alive while `self` is, so this cannot fail.
            let _ = self.tx.send(ContentEvent::Turn { ticket, response: TurnResponse::fallback() });
        }
    }

    /// Fire-and-forget: the caller does not wait for the image.
    pub fn request_scene(&self, request: SceneRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let ticket = request.ticket;
        let spawned = thread::Builder::new().name("content-scene".to_string()).spawn(move || {
            let image = scene_image_or_none(source.as_ref(), &request.description);
            // Only fails during shutdown.
            let _ = tx.send(ContentEvent::Scene { ticket, image });
        });
        if let Err(err) = spawned {
            log::warn!("could not start scene worker: {err}");
            // Our own receiver is alive while `self` is, so this cannot fail.
            let _ = self.tx.send(ContentEvent::Scene { ticket, image: None });
        }
    }

    /// Every completion queued so far, without blocking.
    pub fn drain(&self) -> Vec<ContentEvent> {
        self.rx.try_iter().collect()
    }

    /// Block for the next completion. For headless drivers, not the frame loop.
    pub fn wait(&self, timeout: Duration) -> Option<ContentEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
