//! State management module
//!
//! This module handles turn state: conversation, user and temp state loaded
//! for each inbound activity and persisted through a `Storage` backend.

pub mod context;
pub mod conversation;
pub mod redis_storage;
pub mod scope;
pub mod storage;
pub mod temp;
pub mod turn;
pub mod user;

use std::sync::Arc;
use tracing::info;
use crate::config::{StorageBackend, StorageConfig};
use crate::utils::errors::Result;

// Re-export commonly used state components
pub use context::TurnContext;
pub use conversation::{AppConversationState, ConversationState, Task};
pub use redis_storage::RedisStorage;
pub use scope::{load_scoped, save_scoped, delete_scoped, ScopedState, StateScope, StateValues};
pub use storage::{MemoryStorage, Storage};
pub use temp::TempState;
pub use turn::{AppTurnState, TurnState};
pub use user::UserState;

/// Create the storage backend selected in `config`
pub async fn connect_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory state storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Redis => {
            let storage = RedisStorage::new(config.clone()).await?;
            storage.test_connection().await?;
            info!(prefix = %config.prefix, ttl_seconds = config.ttl_seconds, "Connected to Redis state storage");
            Ok(Arc::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[tokio::test]
    async fn test_connect_memory_storage() {
        let settings = Settings::default();
        let storage = connect_storage(&settings.storage).await.unwrap();
        let turn = TurnContext::new("telegram", "bot", "42", "7");

        let mut state = AppTurnState::load(&turn, Some(storage.as_ref())).await.unwrap();
        state.conversation_mut().create_task("t1", "first").unwrap();
        state.save(&turn, Some(storage.as_ref())).await.unwrap();

        assert!(storage.read("telegram/bot/conversations/42").await.unwrap().is_some());
    }
}
