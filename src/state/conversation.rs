//! Conversation state
//!
//! `ConversationState` is the base record shared by every turn of a
//! conversation thread. `AppConversationState` is the same record plus the
//! assistant's `tasks` map, stored under the same key.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::utils::errors::{AssistantBotError, Result};
use super::context::TurnContext;
use super::scope::{load_scoped, ScopedState, StateScope, StateValues};
use super::storage::Storage;

/// Base conversation-scoped state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// When the record was last saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Application values; unknown persisted fields land here
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl ConversationState {
    /// Load the conversation record for the turn
    pub async fn load(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        load_scoped(context, storage).await
    }
}

impl ScopedState for ConversationState {
    const SCOPE: StateScope = StateScope::Conversation;

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl StateValues for ConversationState {
    fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    fn reserved_keys() -> &'static [&'static str] {
        &["updated_at"]
    }

    fn values_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.values
    }
}

/// A task tracked by the assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    pub description: String,
}

/// Conversation state with the assistant's task list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConversationState {
    /// Task data keyed by task identifier; absent until the first task is stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<HashMap<String, Value>>,
    #[serde(flatten)]
    pub base: ConversationState,
}

impl AppConversationState {
    /// Load the conversation record for the turn into the extended shape.
    ///
    /// Reads the same key as [`ConversationState::load`]; `tasks` is `None`
    /// when it was never persisted.
    pub async fn load(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        load_scoped(context, storage).await
    }

    /// Store a task under `title`, replacing any previous one
    pub fn create_task(&mut self, title: &str, description: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AssistantBotError::InvalidInput("Task title is required".to_string()));
        }

        let task = Task {
            title: title.to_string(),
            description: description.trim().to_string(),
        };
        let value = serde_json::to_value(task)?;
        self.tasks
            .get_or_insert_with(HashMap::new)
            .insert(title.to_string(), value);
        Ok(())
    }

    /// Remove the task under `title`; returns whether it existed
    pub fn delete_task(&mut self, title: &str) -> bool {
        self.tasks
            .as_mut()
            .map_or(false, |tasks| tasks.remove(title.trim()).is_some())
    }

    /// Read the task under `title`
    pub fn task(&self, title: &str) -> Result<Option<Task>> {
        match self.tasks.as_ref().and_then(|tasks| tasks.get(title.trim())) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Task identifiers in sorted order
    pub fn task_titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self
            .tasks
            .iter()
            .flat_map(HashMap::keys)
            .map(String::as_str)
            .collect();
        titles.sort_unstable();
        titles
    }

    /// Number of stored tasks
    pub fn task_count(&self) -> usize {
        self.tasks.as_ref().map_or(0, HashMap::len)
    }
}

impl ScopedState for AppConversationState {
    const SCOPE: StateScope = StateScope::Conversation;

    fn touch(&mut self) {
        self.base.touch();
    }
}

impl StateValues for AppConversationState {
    fn values(&self) -> &Map<String, Value> {
        &self.base.values
    }

    fn reserved_keys() -> &'static [&'static str] {
        &["updated_at", "tasks"]
    }

    fn values_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.base.values
    }
}
