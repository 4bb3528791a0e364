//! AssistantBot Telegram Bot
//!
//! A Telegram assistant that keeps a task list per conversation.
//! This library provides the turn state layer (conversation, user and temp
//! state over a pluggable key-value storage), configuration, and the bot
//! handlers built on top of it.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{AssistantBotError, Result};

// Re-export main components for easy access
pub use state::{AppConversationState, AppTurnState, MemoryStorage, RedisStorage, Storage, TurnContext, TurnState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
