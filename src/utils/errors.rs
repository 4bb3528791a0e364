//! Error handling for AssistantBot
//!
//! This module defines the main error type used throughout the application.
//! State loads never recover locally: whatever a storage backend raises is
//! surfaced to the caller through this type unchanged.

use thiserror::Error;

/// Main error type for AssistantBot
#[derive(Error, Debug)]
pub enum AssistantBotError {
    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Turn context is missing {field}")]
    MissingIdentity { field: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for AssistantBot operations
pub type Result<T> = std::result::Result<T, AssistantBotError>;

impl AssistantBotError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            AssistantBotError::Telegram(_) => true,
            AssistantBotError::Config(_) => false,
            AssistantBotError::Redis(_) => true,
            AssistantBotError::Storage(_) => true,
            AssistantBotError::Serialization(_) => false,
            AssistantBotError::MissingIdentity { .. } => false,
            AssistantBotError::Io(_) => true,
            AssistantBotError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssistantBotError::Config(_) => ErrorSeverity::Critical,
            AssistantBotError::MissingIdentity { .. } => ErrorSeverity::Warning,
            AssistantBotError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
