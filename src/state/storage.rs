//! State storage abstraction
//!
//! Conversation and user state are persisted as JSON values under string
//! keys. `Storage` is the seam every backend implements; `MemoryStorage`
//! keeps records in-process and is the default backend.

use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use crate::utils::errors::Result;

/// Key-value persistence for state records
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the record stored under `key`
    async fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key`, replacing any previous record
    async fn write(&self, key: &str, value: &Value) -> Result<()>;

    /// Remove the record under `key`; returns whether one existed
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// In-process storage backed by a hash map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStorage {
    /// Create an empty memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether no records are stored
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Sorted list of stored keys
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.records.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        let value = self.records.read().await.get(key).cloned();
        debug!(key = %key, has_data = value.is_some(), "Memory storage read");
        Ok(value)
    }

    async fn write(&self, key: &str, value: &Value) -> Result<()> {
        self.records.write().await.insert(key.to_string(), value.clone());
        debug!(key = %key, "Memory storage write");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let deleted = self.records.write().await.remove(key).is_some();
        debug!(key = %key, deleted = deleted, "Memory storage delete");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_write_read_delete() {
        let storage = MemoryStorage::new();
        assert!(storage.is_empty().await);

        storage.write("a", &json!({"x": 1})).await.unwrap();
        assert_eq!(storage.read("a").await.unwrap(), Some(json!({"x": 1})));
        assert_eq!(storage.len().await, 1);

        assert!(storage.delete("a").await.unwrap());
        assert!(!storage.delete("a").await.unwrap());
        assert_eq!(storage.read("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_replaces_record() {
        let storage = MemoryStorage::new();
        storage.write("a", &json!(1)).await.unwrap();
        storage.write("a", &json!(2)).await.unwrap();
        assert_eq!(storage.read("a").await.unwrap(), Some(json!(2)));
        assert_eq!(storage.keys().await, vec!["a".to_string()]);
    }
}
