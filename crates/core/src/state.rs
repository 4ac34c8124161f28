use crate::effects::Effects;
use crate::types::*;

pub const MAX_HEALTH: i32 = 100;
pub const STARTING_AMMO: u32 = 15;
pub const STARTING_LOCATION: &str = "Main Hall";
pub const STARTING_SCENE: &str = "A grand gothic hall. Double staircase. Moonlight.";
pub const STARTING_LOG: &str = "CRISIS-OS v1.0. Zero Hour Protocol Initiated...";
pub const INVENTORY_DISPLAY_SLOTS: usize = 8;

/// Player-facing state. Health and its status tier are private so they can
/// only change together.
#[derive(Clone, Debug)]
pub struct PlayerState {
    health: i32,
    status: HealthStatus,
    pub ammo: u32,
    pub location: String,
    pub visual_description: String,
    pub last_log: String,
    pub inventory: Vec<InventoryItem>,
    pub effects: Effects,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            status: HealthStatus::for_health(MAX_HEALTH),
            ammo: STARTING_AMMO,
            location: STARTING_LOCATION.to_string(),
            visual_description: STARTING_SCENE.to_string(),
            last_log: STARTING_LOG.to_string(),
            inventory: Vec::new(),
            effects: Effects::default(),
        }
    }
}

impl PlayerState {
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn is_dead(&self) -> bool {
        self.status == HealthStatus::Dead
    }

    /// Apply a signed content-source delta. Only the ceiling is clamped; the
    /// caller decides what a non-positive result means.
    pub fn apply_health_change(&mut self, delta: i32) {
        self.set_health(self.health.saturating_add(delta).min(MAX_HEALTH));
    }

    /// Damage from an enemy attack. Triggers the damage flash.
    pub fn take_damage(&mut self, amount: i32) {
        self.set_health(self.health.saturating_sub(amount.max(0)));
        self.effects.trigger(Effect::DamageFlash);
    }

    pub fn apply_ammo_change(&mut self, delta: i32) {
        self.ammo = self.ammo.saturating_add_signed(delta);
    }

    /// Spend one round. Returns false on dry-fire.
    pub fn spend_round(&mut self) -> bool {
        if self.ammo == 0 {
            self.effects.trigger(Effect::DryFire);
            return false;
        }
        self.ammo -= 1;
        self.effects.trigger(Effect::MuzzleFlash);
        self.effects.trigger(Effect::ScreenShake);
        true
    }

    /// Add a found item, stacking onto an existing entry with the same id.
    pub fn add_item(&mut self, item: InventoryItem) {
        if let Some(existing) = self.inventory.iter_mut().find(|entry| entry.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity.max(1));
            return;
        }
        self.inventory.push(InventoryItem { quantity: item.quantity.max(1), ..item });
    }

    /// Items shown in the fixed-size grid; the data model itself is unbounded.
    pub fn visible_inventory(&self) -> &[InventoryItem] {
        let shown = self.inventory.len().min(INVENTORY_DISPLAY_SLOTS);
        &self.inventory[..shown]
    }

    fn set_health(&mut self, health: i32) {
        self.health = health;
        self.status = HealthStatus::for_health(health);
    }
}
