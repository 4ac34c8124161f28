use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Top-level phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Exploring,
    Loading,
    InCombat,
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HealthStatus {
    Fine,
    Caution,
    Danger,
    Dead,
}

impl HealthStatus {
    /// Tier for a raw health value. This is the only place tiers are decided.
    pub fn for_health(health: i32) -> Self {
        if health <= 0 {
            HealthStatus::Dead
        } else if health < 20 {
            HealthStatus::Danger
        } else if health < 50 {
            HealthStatus::Caution
        } else {
            HealthStatus::Fine
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Fine => "FINE",
            HealthStatus::Caution => "CAUTION",
            HealthStatus::Danger => "DANGER",
            HealthStatus::Dead => "DEAD",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Zombie,
    Boss,
}

impl EnemyKind {
    pub fn max_hp(self) -> i32 {
        match self {
            EnemyKind::Zombie => 3,
            EnemyKind::Boss => 15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Healing,
    Key,
    #[default]
    #[serde(other)]
    Misc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
}

fn default_quantity() -> u32 {
    1
}

/// Batch of enemies requested by the content source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncounterSpec {
    pub count: u32,
    pub kind: EnemyKind,
}

/// Explore-phase actions the player can submit as a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    MoveForward,
    TurnLeft,
    TurnRight,
    Search,
}

impl PlayerAction {
    pub const ALL: [PlayerAction; 4] =
        [PlayerAction::MoveForward, PlayerAction::TurnLeft, PlayerAction::TurnRight, PlayerAction::Search];

    /// Text sent to the content source for this action.
    pub fn prompt(self) -> &'static str {
        match self {
            PlayerAction::MoveForward => "Move forward",
            PlayerAction::TurnLeft => "Turn left",
            PlayerAction::TurnRight => "Turn right",
            PlayerAction::Search => "Search the area thoroughly",
        }
    }
}

/// Transient presentation cues. Each one clears itself after a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    MuzzleFlash,
    ScreenShake,
    DamageFlash,
    DryFire,
}

impl Effect {
    pub const ALL: [Effect; 4] =
        [Effect::MuzzleFlash, Effect::ScreenShake, Effect::DamageFlash, Effect::DryFire];

    pub fn duration_ms(self) -> f32 {
        match self {
            Effect::MuzzleFlash | Effect::ScreenShake | Effect::DamageFlash => 100.0,
            Effect::DryFire => 150.0,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Effect::MuzzleFlash => 0,
            Effect::ScreenShake => 1,
            Effect::DamageFlash => 2,
            Effect::DryFire => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FireOutcome {
    /// Zero ammo: feedback only, nothing mutated.
    DryFire,
    Miss,
    Hit { target: EnemyId, remaining_hp: i32 },
    Killed { target: EnemyId },
    /// Round spent on a target that was already gone.
    Stale { target: EnemyId },
}

impl FireOutcome {
    pub fn consumed_ammo(self) -> bool {
        !matches!(self, FireOutcome::DryFire)
    }
}
