//! Gemini `generateContent` adapter.

use std::env;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ureq::{Agent, AgentBuilder, Error as HttpError};

use super::prompts::{scene_prompt, turn_instruction, turn_schema};
use super::{ContentError, ContentSource, SceneImage, TurnContext, TurnResponse, parse_turn_response};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const TURN_TEMPERATURE: f32 = 0.8;

#[derive(Clone, Debug, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout: Duration,
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            temperature: TURN_TEMPERATURE,
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from a variable lookup. `GEMINI_API_KEY` wins over `API_KEY`;
    /// blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            api_key: read("GEMINI_API_KEY").or_else(|| read("API_KEY")),
            base_url: read("ZERO_HOUR_BASE_URL").unwrap_or(defaults.base_url),
            text_model: read("ZERO_HOUR_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: read("ZERO_HOUR_IMAGE_MODEL").unwrap_or(defaults.image_model),
            ..defaults
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text), inline_data: None }],
        }
    }
}

#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateResponse {
    fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    fn text(&self) -> Option<String> {
        let text: String = self.parts().iter().filter_map(|part| part.text.as_deref()).collect();
        (!text.trim().is_empty()).then_some(text)
    }

    fn image(&self) -> Result<Option<SceneImage>, ContentError> {
        let Some(inline) = self.parts().iter().find_map(|part| part.inline_data.as_ref()) else {
            return Ok(None);
        };
        let bytes = BASE64.decode(inline.data.as_bytes())?;
        Ok(Some(SceneImage { mime_type: inline.mime_type.clone(), bytes }))
    }
}

pub struct GeminiClient {
    config: GeminiConfig,
    agent: Agent,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let agent = AgentBuilder::new().timeout(config.timeout).build();
        Self { config, agent }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn generate(&self, model: &str, request: &GenerateRequest) -> Result<GenerateResponse, ContentError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ContentError::MissingApiKey);
        };
        let url = self.config.endpoint(model);
        log::debug!("POST {url}");

        let response = match self.agent.post(&url).set("x-goog-api-key", api_key).send_json(request) {
            Ok(response) => response,
            Err(HttpError::Status(code, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(ContentError::Status { code, body });
            }
            Err(HttpError::Transport(transport)) => {
                return Err(ContentError::Transport(transport.to_string()));
            }
        };
        let body =
            response.into_string().map_err(|err| ContentError::Transport(err.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl ContentSource for GeminiClient {
    fn resolve_turn(
        &self,
        action: &str,
        context: &TurnContext,
    ) -> Result<TurnResponse, ContentError> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), action.to_string())],
            system_instruction: Some(Content::text(None, turn_instruction(action, context))),
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: turn_schema(),
                temperature: self.config.temperature,
            }),
        };
        let response = self.generate(&self.config.text_model, &request)?;
        let text = response.text().ok_or(ContentError::EmptyResponse)?;
        parse_turn_response(&text)
    }

    fn scene_image(&self, description: &str) -> Result<Option<SceneImage>, ContentError> {
        let request = GenerateRequest {
            contents: vec![Content::text(Some("user"), scene_prompt(description))],
            system_instruction: None,
            generation_config: None,
        };
        self.generate(&self.config.image_model, &request)?.image()
    }
}
