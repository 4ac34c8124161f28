//! Settings persisted between launches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use zero_hour_core::content::gemini::GeminiConfig;

use crate::APP_NAME;

pub const SETTINGS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SettingsFile {
    pub format_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_model: Option<String>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self { format_version: SETTINGS_FORMAT_VERSION, ui_scale: None, text_model: None, image_model: None }
    }
}

impl SettingsFile {
    pub fn get_default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|proj_dirs| {
            let mut path = proj_dirs.data_dir().to_path_buf();
            path.push("settings.json");
            path
        })
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }

    /// Load, treating a missing or unreadable file as defaults.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                log::warn!("ignoring settings at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Model overrides from the file. Environment variables already applied
    /// to `config` take precedence.
    pub fn apply_to(&self, config: &mut GeminiConfig, env_has_override: impl Fn(&str) -> bool) {
        if let Some(model) = &self.text_model
            && !env_has_override("ZERO_HOUR_TEXT_MODEL")
        {
            config.text_model = model.clone();
        }
        if let Some(model) = &self.image_model
            && !env_has_override("ZERO_HOUR_IMAGE_MODEL")
        {
            config.image_model = model.clone();
        }
    }
}
