//! Enemy model for a single encounter: spawning a batch and locating a target
//! under the crosshair.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use slotmap::SlotMap;

use crate::types::{EncounterSpec, EnemyId, EnemyKind};

pub const SPAWN_SCALE: f32 = 0.1;
pub const MAX_ENCOUNTER_SIZE: u32 = 8;
/// Reference sprite size in pixels at scale 1.0.
pub const SPRITE_WIDTH: f32 = 100.0;
pub const SPRITE_HEIGHT: f32 = 150.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    /// Horizontal position as a percentage of the viewport width.
    pub x: f32,
    /// Vertical position as a percentage of the viewport height.
    pub y: f32,
    pub scale: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }
}

pub type EnemySet = SlotMap<EnemyId, Enemy>;

pub fn spawn_batch(spec: EncounterSpec, rng: &mut ChaCha8Rng) -> EnemySet {
    let mut enemies = EnemySet::with_key();
    let count = spec.count.min(MAX_ENCOUNTER_SIZE);
    for _ in 0..count {
        let enemy = Enemy {
            id: EnemyId::default(),
            x: 20.0 + unit(rng) * 60.0,
            y: 40.0 + unit(rng) * 20.0,
            scale: SPAWN_SCALE,
            hp: spec.kind.max_hp(),
            max_hp: spec.kind.max_hp(),
            speed: 0.5 + unit(rng) * 0.5,
            kind: spec.kind,
        };
        let id = enemies.insert(enemy);
        enemies[id].id = id;
    }
    enemies
}

/// Enemies ordered back to front, the order they are drawn in.
pub fn draw_order(enemies: &EnemySet) -> Vec<&Enemy> {
    let mut ordered: Vec<&Enemy> = enemies.values().collect();
    ordered.sort_by(|a, b| a.scale.total_cmp(&b.scale));
    ordered
}

/// Resolve a point (in pixels) against the on-screen enemy sprites. The
/// closest enemy wins when sprites overlap.
pub fn pick_target(
    enemies: &EnemySet,
    point: (f32, f32),
    viewport: (f32, f32),
) -> Option<EnemyId> {
    let (px, py) = point;
    let (width, height) = viewport;
    draw_order(enemies).into_iter().rev().find_map(|enemy| {
        let cx = enemy.x / 100.0 * width;
        let cy = enemy.y / 100.0 * height;
        let half_w = SPRITE_WIDTH * enemy.scale / 2.0;
        let half_h = SPRITE_HEIGHT * enemy.scale / 2.0;
        let inside = (px - cx).abs() <= half_w && (py - cy).abs() <= half_h;
        inside.then_some(enemy.id)
    })
}

fn unit(rng: &mut ChaCha8Rng) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}
