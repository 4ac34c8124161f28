pub mod combat;
pub mod content;
pub mod dispatch;
pub mod effects;
pub mod encounter;
pub mod session;
pub mod state;
pub mod types;

pub use combat::{Combat, CombatEvent};
pub use content::{ContentError, ContentSource, SceneImage, TurnContext, TurnResponse};
pub use dispatch::{ContentEvent, Dispatcher};
pub use encounter::{Enemy, EnemySet};
pub use session::{
    FrameReport, SceneDecision, SceneRequest, Session, SessionError, TurnOutcome, TurnRequest,
};
pub use state::PlayerState;
pub use types::*;
