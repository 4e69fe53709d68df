use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    DEFAULT_BACKEND_URL, DEFAULT_MODEL, DEFAULT_MODELS, SPLIT_RATIO_MAX, SPLIT_RATIO_MIN,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the summarization backend lives
    #[serde(default)]
    pub backend: BackendConfig,
    /// Models offered by the model selector
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend (endpoints are appended to it)
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Per-request timeout in seconds (None = wait indefinitely)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Model selected at startup
    #[serde(default = "default_model")]
    pub default: String,
    /// Models the selector cycles through
    #[serde(default = "default_models")]
    pub available: Vec<String>,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
            available: default_models(),
        }
    }
}

impl ModelsConfig {
    /// Selector entries: the configured list, with the default model first
    /// if it is not already listed. Blank and duplicate names are dropped.
    pub fn candidates(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(self.available.len() + 1);
        let default = self.default.trim();
        if !default.is_empty() && !self.available.iter().any(|m| m.trim() == default) {
            out.push(default.to_string());
        }
        for model in &self.available {
            let model = model.trim();
            if !model.is_empty() && !out.iter().any(|m| m == model) {
                out.push(model.to_string());
            }
        }
        if out.is_empty() {
            out.push(DEFAULT_MODEL.to_string());
        }
        out
    }

    /// The model selected at startup, falling back to the first candidate.
    pub fn initial(&self) -> String {
        let default = self.default.trim();
        if default.is_empty() {
            self.candidates().remove(0)
        } else {
            default.to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub keybinding_mode: KeybindingMode,
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Width of the email list as a percentage of the screen (30-70)
    #[serde(default = "default_split_ratio")]
    pub split_ratio: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            keybinding_mode: KeybindingMode::default(),
            theme: ThemeVariant::default(),
            split_ratio: default_split_ratio(),
        }
    }
}

impl UiConfig {
    pub fn clamped_split_ratio(&self) -> u16 {
        self.split_ratio.clamp(SPLIT_RATIO_MIN, SPLIT_RATIO_MAX)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KeybindingMode {
    #[default]
    Vim,
    Arrows,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_models() -> Vec<String> {
    DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
}

fn default_split_ratio() -> u16 {
    45
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mailchat");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, or defaults when none exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::info!(
                "No config file at {}, using defaults (backend {})",
                path.display(),
                DEFAULT_BACKEND_URL
            );
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = path
            .parent()
            .context("Config path has no parent directory")?;

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [backend]
            url = "http://mail-ai.internal:8000/"
            request_timeout_secs = 90

            [models]
            default = "llama-3.3-70b"
            available = ["llama3.1-8b", "llama-3.3-70b"]

            [ui]
            keybinding_mode = "arrows"
            theme = "high-contrast"
            split_ratio = 60
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.url, "http://mail-ai.internal:8000/");
        assert_eq!(
            config.backend.request_timeout(),
            Some(Duration::from_secs(90))
        );
        assert_eq!(config.models.initial(), "llama-3.3-70b");
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Arrows);
        assert_eq!(config.ui.theme, ThemeVariant::HighContrast);
        assert_eq!(config.ui.clamped_split_ratio(), 60);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.backend.url, DEFAULT_BACKEND_URL);
        assert_eq!(config.backend.request_timeout(), None);
        assert_eq!(config.models.initial(), DEFAULT_MODEL);
        assert_eq!(config.models.candidates().len(), DEFAULT_MODELS.len());
        assert_eq!(config.ui.keybinding_mode, KeybindingMode::Vim);
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let config: Config = toml::from_str("[backend]\nrequest_timeout_secs = 0").unwrap();
        assert_eq!(config.backend.request_timeout(), None);
    }

    #[test]
    fn test_candidates_include_unlisted_default() {
        let models = ModelsConfig {
            default: "custom-model".to_string(),
            available: vec![
                "llama3.1-8b".to_string(),
                " ".to_string(),
                "llama3.1-8b".to_string(),
            ],
        };
        assert_eq!(models.candidates(), vec!["custom-model", "llama3.1-8b"]);
    }

    #[test]
    fn test_blank_default_falls_back_to_first_candidate() {
        let models = ModelsConfig {
            default: String::new(),
            available: vec!["qwen-3-32b".to_string()],
        };
        assert_eq!(models.initial(), "qwen-3-32b");

        let empty = ModelsConfig {
            default: String::new(),
            available: Vec::new(),
        };
        assert_eq!(empty.initial(), DEFAULT_MODEL);
    }

    #[test]
    fn test_split_ratio_is_clamped() {
        let ui = UiConfig {
            split_ratio: 95,
            ..Default::default()
        };
        assert_eq!(ui.clamped_split_ratio(), SPLIT_RATIO_MAX);
    }
}
