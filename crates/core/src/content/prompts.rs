//! Prompt text and response schema sent to the generative service.

use serde_json::{Value, json};

use super::TurnContext;

pub fn turn_instruction(action: &str, context: &TurnContext) -> String {
    let inventory = if context.inventory.is_empty() {
        "nothing".to_string()
    } else {
        context.inventory.join(", ")
    };
    format!(
        "You run the level logic of a first-person survival horror shooter.\n\
         You describe the player's surroundings and decide whether combat starts.\n\
         \n\
         Location: {location}\n\
         Condition: {status} ({health} HP), {ammo} rounds, carrying {inventory}\n\
         Action: {action}\n\
         \n\
         Rules:\n\
         1. Moving into a new area gets a short visual description of that area.\n\
         2. Start combat on roughly 20-40% of turns, but not right after a search that found nothing.\n\
         3. When combat starts, set encounter.hasEnemies to true with a small enemyCount.\n\
         4. Searching sometimes yields 2-5 rounds of ammo.\n\
         5. The narrative is a terse HUD line of at most 15 words.",
        location = context.location,
        status = context.status.label(),
        health = context.health,
        ammo = context.ammo,
    )
}

pub fn scene_prompt(description: &str) -> String {
    format!(
        "First-person shooter viewpoint with no HUD. \
         Survival horror mood in the style of classic mansion horror games: dark, gritty, photorealistic. \
         Camera at eye level looking down a corridor or into a room. \
         Scene: {description}"
    )
}

/// JSON schema (Gemini `responseSchema` dialect) for a generated turn.
pub fn turn_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "narrative": {
                "type": "STRING",
                "description": "Short status update, at most 15 words."
            },
            "visualPrompt": {
                "type": "STRING",
                "description": "First-person visual description with depth and atmosphere."
            },
            "encounter": {
                "type": "OBJECT",
                "nullable": true,
                "properties": {
                    "hasEnemies": { "type": "BOOLEAN" },
                    "enemyCount": { "type": "INTEGER" },
                    "enemyType": { "type": "STRING", "enum": ["zombie", "boss"] }
                }
            },
            "stateUpdate": {
                "type": "OBJECT",
                "properties": {
                    "healthChange": { "type": "INTEGER" },
                    "ammoChange": { "type": "INTEGER" },
                    "location": { "type": "STRING" },
                    "itemFound": {
                        "type": "OBJECT",
                        "nullable": true,
                        "properties": {
                            "id": { "type": "STRING" },
                            "name": { "type": "STRING" },
                            "description": { "type": "STRING" },
                            "quantity": { "type": "INTEGER" },
                            "type": { "type": "STRING" }
                        }
                    }
                }
            }
        },
        "required": ["narrative", "visualPrompt", "stateUpdate"]
    })
}
