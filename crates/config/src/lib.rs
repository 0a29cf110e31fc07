//! Configuration loading and validation for scout.
//!
//! Loads configuration from `~/.scout/config.toml` with environment
//! variable overrides. Secrets are redacted from Debug output.
//!
//! Publisher credentials are optional: a publisher with missing credentials
//! is skipped at run time with a warning. The model API key is required only
//! when a task actually executes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.scout/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    /// Model used for research sweeps
    #[serde(default = "default_model")]
    pub model: String,

    /// Recency window in calendar days
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Maximum items requested from the model (prompt-level hint)
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Notion workspace publisher configuration
    #[serde(default)]
    pub notion: NotionConfig,

    /// Google Chat publisher configuration
    #[serde(default)]
    pub chat: ChatConfig,
}

fn default_model() -> String {
    "gemini-2.5-pro".into()
}
fn default_lookback_days() -> u32 {
    30
}
fn default_max_items() -> usize {
    10
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("gemini_api_key", &redact(&self.gemini_api_key))
            .field("model", &self.model)
            .field("lookback_days", &self.lookback_days)
            .field("max_items", &self.max_items)
            .field("notion", &self.notion)
            .field("chat", &self.chat)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            lookback_days: default_lookback_days(),
            max_items: default_max_items(),
            notion: NotionConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

/// Notion publisher settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Parent page the report pages are created under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_page_id: Option<String>,
}

impl NotionConfig {
    /// Whether both credentials are present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.parent_page_id.is_some()
    }
}

impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("api_key", &redact(&self.api_key))
            .field("parent_page_id", &self.parent_page_id)
            .finish()
    }
}

/// Google Chat publisher settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Incoming webhook URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

impl ChatConfig {
    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }
}

impl std::fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The webhook URL embeds a token, so treat it as a secret too
        f.debug_struct("ChatConfig")
            .field("webhook_url", &redact(&self.webhook_url))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration with environment variable overrides.
    ///
    /// Env vars take priority over the config file:
    /// - `GEMINI_API_KEY`
    /// - `SCOUT_MODEL`
    /// - `NOTION_API_KEY`
    /// - `NOTION_PAGE_ID` (falls back to `NOTION_DATABASE_ID`)
    /// - `GOOGLE_CHAT_WEBHOOK_URL` (falls back to `WEBHOOK_URL`)
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, without env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("SCOUT_MODEL") {
            self.model = model;
        }
        if let Ok(key) = std::env::var("NOTION_API_KEY") {
            self.notion.api_key = Some(key);
        }
        if let Some(page) = std::env::var("NOTION_PAGE_ID")
            .ok()
            .or_else(|| std::env::var("NOTION_DATABASE_ID").ok())
        {
            self.notion.parent_page_id = Some(page);
        }
        if let Some(url) = std::env::var("GOOGLE_CHAT_WEBHOOK_URL")
            .ok()
            .or_else(|| std::env::var("WEBHOOK_URL").ok())
        {
            self.chat.webhook_url = Some(url);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".scout")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_days == 0 {
            return Err(ConfigError::ValidationError(
                "lookback_days must be at least 1".into(),
            ));
        }
        if self.max_items == 0 {
            return Err(ConfigError::ValidationError(
                "max_items must be at least 1".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationError("model must not be empty".into()));
        }
        Ok(())
    }
}

fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.max_items, 10);
        assert!(config.validate().is_ok());
        assert!(!config.notion.is_configured());
        assert!(!config.chat.is_configured());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.lookback_days, 30);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model = "gemini-2.5-flash"
lookback_days = 14

[notion]
api_key = "secret_abc"
parent_page_id = "page123"

[chat]
webhook_url = "https://chat.googleapis.com/v1/spaces/x/messages?key=y"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.lookback_days, 14);
        assert_eq!(config.max_items, 10); // defaulted
        assert!(config.notion.is_configured());
        assert!(config.chat.is_configured());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = [not toml").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn zero_lookback_rejected() {
        let config = AppConfig {
            lookback_days: 0,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn secrets_redacted_in_debug() {
        let config = AppConfig {
            gemini_api_key: Some("AIza-very-secret".into()),
            chat: ChatConfig {
                webhook_url: Some("https://chat.googleapis.com/?key=tok".into()),
            },
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("AIza-very-secret"));
        assert!(!debug.contains("key=tok"));
        assert!(debug.contains("[REDACTED]"));
    }
}
