//! Redis state storage
//!
//! This module persists state records in Redis as JSON strings, under the
//! configured key prefix and with an optional expiry.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::{debug, error};
use crate::config::StorageConfig;
use crate::utils::errors::{AssistantBotError, Result};
use crate::utils::logging::log_storage_error;
use super::storage::Storage;

/// Redis-based state storage
#[derive(Clone)]
pub struct RedisStorage {
    /// Redis connection manager
    connection_manager: redis::aio::ConnectionManager,
    /// Storage configuration
    config: StorageConfig,
}

impl RedisStorage {
    /// Connect to the Redis server named in `config`
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            config,
        })
    }

    /// Test Redis connection
    pub async fn test_connection(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// List the unprefixed keys of all stored records
    pub async fn keys(&self) -> Result<Vec<String>> {
        let pattern = format!("{}*", self.config.prefix);
        let mut conn = self.connection_manager.clone();

        let keys: Vec<String> = conn.keys(&pattern).await?;
        let mut keys: Vec<String> = keys
            .into_iter()
            .filter_map(|key| key.strip_prefix(&self.config.prefix).map(str::to_string))
            .collect();
        keys.sort();

        debug!(count = keys.len(), "Listed stored state keys");
        Ok(keys)
    }

    /// Get the Redis key for a state key
    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }
}

#[async_trait]
impl Storage for RedisStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let full_key = self.full_key(key);
        debug!(key = %full_key, "Loading state from Redis");

        let mut conn = self.connection_manager.clone();
        let serialized: Option<String> = match conn.get::<&str, Option<String>>(&full_key).await {
            Ok(data) => data,
            Err(e) => {
                let err: AssistantBotError = e.into();
                log_storage_error("read", &full_key, &err);
                return Err(err);
            }
        };

        match serialized {
            Some(data) => {
                debug!(key = %full_key, data_length = data.len(), "Deserializing state record");
                match serde_json::from_str::<Value>(&data) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        error!(key = %full_key, error = %e, "Failed to deserialize state record");
                        Err(e.into())
                    }
                }
            }
            None => {
                debug!(key = %full_key, "No state found in Redis");
                Ok(None)
            }
        }
    }

    async fn write(&self, key: &str, value: &Value) -> Result<()> {
        let full_key = self.full_key(key);
        let serialized = serde_json::to_string(value)?;
        let mut conn = self.connection_manager.clone();

        let result = if self.config.ttl_seconds > 0 {
            conn.set_ex::<_, _, ()>(&full_key, serialized, self.config.ttl_seconds).await
        } else {
            conn.set::<_, _, ()>(&full_key, serialized).await
        };

        match result {
            Ok(()) => {
                debug!(key = %full_key, ttl_seconds = self.config.ttl_seconds, "State saved to Redis");
                Ok(())
            }
            Err(e) => {
                let err: AssistantBotError = e.into();
                log_storage_error("write", &full_key, &err);
                Err(err)
            }
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.connection_manager.clone();

        match conn.del::<_, u32>(&full_key).await {
            Ok(deleted) => {
                debug!(key = %full_key, deleted = deleted > 0, "State deletion attempted");
                Ok(deleted > 0)
            }
            Err(e) => {
                let err: AssistantBotError = e.into();
                log_storage_error("delete", &full_key, &err);
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for RedisStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStorage")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
