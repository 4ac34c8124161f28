//! Content source boundary: the wire shape of generated turns, the adapter
//! trait, and the fallback rules that keep failures invisible to the session.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::state::PlayerState;
use crate::types::{EncounterSpec, EnemyKind, HealthStatus, InventoryItem, ItemKind};

pub mod gemini;
pub mod prompts;
pub mod scripted;

pub const FALLBACK_NARRATIVE: &str = "Signal lost...";
pub const FALLBACK_VISUAL_PROMPT: &str = "Static noise";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("transport error: {0}")]
    Transport(String),
    #[error("content service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("content service returned no usable content")]
    EmptyResponse,
    #[error("image payload could not be decoded: {0}")]
    ImageDecode(#[from] base64::DecodeError),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResponse {
    pub narrative: String,
    pub visual_prompt: String,
    #[serde(default)]
    pub encounter: Option<EncounterPayload>,
    #[serde(default)]
    pub state_update: StateUpdate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterPayload {
    #[serde(default)]
    pub has_enemies: bool,
    #[serde(default)]
    pub enemy_count: i32,
    #[serde(default = "default_enemy_kind")]
    pub enemy_type: EnemyKind,
}

fn default_enemy_kind() -> EnemyKind {
    EnemyKind::Zombie
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_change: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ammo_change: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "found_item", skip_serializing_if = "Option::is_none")]
    pub item_found: Option<InventoryItem>,
}

/// Loose shape of `itemFound`. A broken item is dropped on its own so the
/// rest of the turn still applies.
#[derive(Deserialize)]
#[serde(default)]
struct FoundItem {
    id: String,
    name: String,
    description: String,
    quantity: i64,
    #[serde(rename = "type")]
    kind: ItemKind,
}

impl Default for FoundItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            quantity: 1,
            kind: ItemKind::Misc,
        }
    }
}

impl FoundItem {
    fn into_item(self) -> Option<InventoryItem> {
        let name = self.name.trim();
        let id = match self.id.trim() {
            "" => name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-"),
            id => id.to_string(),
        };
        if id.is_empty() {
            return None;
        }
        Some(InventoryItem {
            name: if name.is_empty() { id.clone() } else { name.to_string() },
            id,
            description: self.description,
            quantity: u32::try_from(self.quantity.max(1)).unwrap_or(u32::MAX),
            kind: self.kind,
        })
    }
}

fn found_item<'de, D>(deserializer: D) -> Result<Option<InventoryItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match serde_json::from_value::<FoundItem>(raw) {
        Ok(found) => {
            let item = found.into_item();
            if item.is_none() {
                log::debug!("dropping found item without id or name");
            }
            Ok(item)
        }
        Err(err) => {
            log::debug!("dropping unreadable found item: {err}");
            Ok(None)
        }
    }
}

impl TurnResponse {
    pub fn fallback() -> Self {
        Self {
            narrative: FALLBACK_NARRATIVE.to_string(),
            visual_prompt: FALLBACK_VISUAL_PROMPT.to_string(),
            encounter: Some(EncounterPayload {
                has_enemies: false,
                enemy_count: 0,
                enemy_type: EnemyKind::Zombie,
            }),
            state_update: StateUpdate::default(),
        }
    }

    /// The encounter to spawn, if the response asked for at least one enemy.
    pub fn encounter_spec(&self) -> Option<EncounterSpec> {
        let encounter = self.encounter.as_ref()?;
        if !encounter.has_enemies || encounter.enemy_count < 1 {
            return None;
        }
        Some(EncounterSpec { count: encounter.enemy_count as u32, kind: encounter.enemy_type })
    }
}

/// A generated scene image, still encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// What the content source is told about the player when resolving a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnContext {
    pub location: String,
    pub health: i32,
    pub status: HealthStatus,
    pub ammo: u32,
    pub inventory: Vec<String>,
}

impl TurnContext {
    pub fn capture(player: &PlayerState) -> Self {
        Self {
            location: player.location.clone(),
            health: player.health(),
            status: player.status(),
            ammo: player.ammo,
            inventory: player.inventory.iter().map(|item| item.name.clone()).collect(),
        }
    }
}

pub trait ContentSource: Send + Sync {
    fn resolve_turn(&self, action: &str, context: &TurnContext)
    -> Result<TurnResponse, ContentError>;

    /// `Ok(None)` means the service answered without an image.
    fn scene_image(&self, description: &str) -> Result<Option<SceneImage>, ContentError>;
}

/// Resolve a turn, degrading any failure to the fallback response.
pub fn resolve_turn_or_fallback(
    source: &dyn ContentSource,
    action: &str,
    context: &TurnContext,
) -> TurnResponse {
    match source.resolve_turn(action, context) {
        Ok(response) => response,
        Err(err) => {
            log::warn!("turn resolution failed for {action:?}: {err}");
            TurnResponse::fallback()
        }
    }
}

/// Generate a scene image, treating any failure as "no image".
pub fn scene_image_or_none(source: &dyn ContentSource, description: &str) -> Option<SceneImage> {
    match source.scene_image(description) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("scene image generation failed: {err}");
            None
        }
    }
}

/// Parse the model's JSON text. Tolerates a surrounding markdown code fence.
pub fn parse_turn_response(text: &str) -> Result<TurnResponse, ContentError> {
    let mut body = text.trim();
    if let Some(rest) = body.strip_prefix("```") {
        body = rest.trim_start_matches("json");
        body = body.strip_suffix("```").unwrap_or(body).trim();
    }
    if body.is_empty() {
        return Err(ContentError::EmptyResponse);
    }
    Ok(serde_json::from_str(body)?)
}
