//! Configuration loading for the Dexter TUI.
//!
//! Every field has a default, so running without a config file browses the
//! public catalog. A file named by `--config` or `DEXTER_CONFIG` overrides
//! the fields it sets.

use dexter_core::{Locale, NavSettings, RecordId, DEFAULT_CATALOG_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct TuiConfig {
    pub catalog_base_url: String,
    pub request_timeout_ms: u64,
    pub start_id: u32,
    pub locale: Locale,
    pub cooldown_ms: u64,
    pub announce_debounce_ms: u64,
    pub random_seed: Option<u64>,
    pub tick_rate_ms: u64,
    pub log_path: PathBuf,
    pub speech: SpeechConfig,
    pub theme: ThemeConfig,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout_ms: 10_000,
            start_id: 1,
            locale: Locale::Czech,
            cooldown_ms: 2_500,
            announce_debounce_ms: 500,
            random_seed: None,
            tick_rate_ms: 250,
            log_path: PathBuf::from("dexter.log"),
            speech: SpeechConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub program: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "espeak-ng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "synthbrute".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    /// Load from `--config` / `DEXTER_CONFIG`, or defaults when neither is set.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let config = match path {
            Some(path) => Self::from_path(&path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: TuiConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "catalog_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.start_id == 0 {
            return Err(ConfigError::InvalidValue {
                field: "start_id",
                reason: "must be >= 1".to_string(),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tick_rate_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.speech.enabled && self.speech.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "speech.program",
                reason: "must not be empty when speech is enabled".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "synthbrute" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        Ok(())
    }

    pub fn start(&self) -> RecordId {
        RecordId::new(self.start_id).unwrap_or(RecordId::FIRST)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn announce_debounce(&self) -> Duration {
        Duration::from_millis(self.announce_debounce_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn nav_settings(&self) -> NavSettings {
        NavSettings::new()
            .with_cooldown(Duration::from_millis(self.cooldown_ms))
            .with_start(self.start())
            .with_locale(self.locale)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("DEXTER_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}
