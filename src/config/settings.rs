//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Identifier used in storage keys; defaults to the bot's Telegram id when empty
    #[serde(default)]
    pub bot_id: String,
}

/// Which storage backend holds conversation and user state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Redis,
}

/// State storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub prefix: String,
    /// Expiry applied to every written record; 0 disables expiry
    pub ttl_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();
        let settings = config::Config::builder()
            .set_default("storage.backend", "memory")?
            .set_default("storage.url", defaults.storage.url)?
            .set_default("storage.prefix", defaults.storage.prefix)?
            .set_default("storage.ttl_seconds", defaults.storage.ttl_seconds)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.file_path", defaults.logging.file_path)?
            .set_default("bot.bot_id", "")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("ASSISTANTBOT").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::AssistantBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                bot_id: String::new(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                url: "redis://localhost:6379".to_string(),
                prefix: "assistantbot:".to_string(),
                ttl_seconds: 0,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
