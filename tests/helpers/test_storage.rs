//! Storage doubles for turn state tests

#![allow(dead_code)]

use std::sync::Mutex;
use async_trait::async_trait;
use serde_json::Value;
use AssistantBot::state::{MemoryStorage, Storage};
use AssistantBot::{AssistantBotError, Result};

/// Memory storage that records every key it is asked to read
#[derive(Debug, Default)]
pub struct RecordingStorage {
    pub inner: MemoryStorage,
    reads: Mutex<Vec<String>>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        self.reads.lock().unwrap().push(key.to_string());
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &Value) -> Result<()> {
        self.inner.write(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key).await
    }
}

/// Memory storage whose reads fail for keys containing `fail_on`
#[derive(Debug)]
pub struct FailingStorage {
    pub inner: MemoryStorage,
    fail_on: String,
}

impl FailingStorage {
    pub fn new(fail_on: &str) -> Self {
        Self {
            inner: MemoryStorage::new(),
            fail_on: fail_on.to_string(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn read(&self, key: &str) -> Result<Option<Value>> {
        if key.contains(&self.fail_on) {
            return Err(AssistantBotError::Storage(format!("backend unavailable for {}", key)));
        }
        self.inner.read(key).await
    }

    async fn write(&self, key: &str, value: &Value) -> Result<()> {
        self.inner.write(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete(key).await
    }
}
