//! State scopes and scoped load/save
//!
//! Every state shape belongs to one scope. The scope decides the storage key
//! for a turn (or that the state is never stored), and the generic functions
//! here load and persist any shape against that key.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use crate::utils::errors::{AssistantBotError, Result};
use super::context::TurnContext;
use super::storage::Storage;

/// Lifetime of a piece of state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateScope {
    /// Shared by all turns of one conversation thread
    Conversation,
    /// Shared by all conversations of one user
    User,
    /// Discarded at the end of the turn
    Temp,
}

impl StateScope {
    /// Storage key for this scope in the given turn; `None` for temp state.
    pub fn storage_key(&self, context: &TurnContext) -> Result<Option<String>> {
        let collection = match self {
            StateScope::Temp => return Ok(None),
            StateScope::Conversation => "conversations",
            StateScope::User => "users",
        };

        if context.channel_id.is_empty() {
            return Err(AssistantBotError::MissingIdentity { field: "channel_id" });
        }
        if context.bot_id.is_empty() {
            return Err(AssistantBotError::MissingIdentity { field: "bot_id" });
        }

        let id = match self {
            StateScope::User => context
                .user_id()
                .ok_or(AssistantBotError::MissingIdentity { field: "user_id" })?,
            _ => context
                .conversation_id()
                .ok_or(AssistantBotError::MissingIdentity { field: "conversation_id" })?,
        };

        Ok(Some(format!("{}/{}/{}/{}", context.channel_id, context.bot_id, collection, id)))
    }
}

/// A state shape that can be loaded for, and saved from, a turn
pub trait ScopedState: Serialize + DeserializeOwned + Default + Send + Sync {
    /// Scope the shape is stored under
    const SCOPE: StateScope;

    /// Fill fields that come from the turn itself rather than from storage
    fn hydrate(&mut self, _context: &TurnContext) {}

    /// Stamp the shape before it is written
    fn touch(&mut self) {}
}

/// Open, application-defined values carried by a state record
pub trait StateValues {
    fn values(&self) -> &Map<String, Value>;

    fn values_mut(&mut self) -> &mut Map<String, Value>;

    /// Names of the record's typed fields. Values may not use them, or they
    /// would overwrite those fields when the record is saved.
    fn reserved_keys() -> &'static [&'static str] {
        &[]
    }

    /// Store a serializable value under `key`
    fn set_value<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        if Self::reserved_keys().iter().any(|reserved| *reserved == key) {
            return Err(AssistantBotError::InvalidInput(format!("'{}' is a reserved state field", key)));
        }
        let json_value = serde_json::to_value(value)?;
        self.values_mut().insert(key.to_string(), json_value);
        Ok(())
    }

    /// Read the value under `key` as `T`
    fn value<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        match self.values().get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Remove the value under `key`
    fn remove_value(&mut self, key: &str) -> Option<Value> {
        self.values_mut().remove(key)
    }
}

/// Load a state shape for the turn.
///
/// A missing record, or a missing storage handle, yields the shape's default.
/// Identity and storage failures are returned unchanged.
pub async fn load_scoped<S: ScopedState>(
    context: &TurnContext,
    storage: Option<&dyn Storage>,
) -> Result<S> {
    let mut state = match (S::SCOPE.storage_key(context)?, storage) {
        (None, _) => S::default(),
        (Some(key), None) => {
            debug!(key = %key, scope = ?S::SCOPE, "No storage configured, using default state");
            S::default()
        }
        (Some(key), Some(storage)) => match storage.read(&key).await? {
            Some(value) => {
                let state = serde_json::from_value(value)?;
                debug!(key = %key, scope = ?S::SCOPE, "State loaded");
                state
            }
            None => {
                debug!(key = %key, scope = ?S::SCOPE, "No stored state, using default");
                S::default()
            }
        },
    };

    state.hydrate(context);
    Ok(state)
}

/// Persist a state shape for the turn. Temp state and a missing storage
/// handle are no-ops.
pub async fn save_scoped<S: ScopedState>(
    state: &S,
    context: &TurnContext,
    storage: Option<&dyn Storage>,
) -> Result<()> {
    let (Some(key), Some(storage)) = (S::SCOPE.storage_key(context)?, storage) else {
        return Ok(());
    };

    let value = serde_json::to_value(state)?;
    storage.write(&key, &value).await?;
    debug!(key = %key, scope = ?S::SCOPE, "State saved");
    Ok(())
}

/// Remove the stored record for a scope; returns whether one existed.
pub async fn delete_scoped(
    scope: StateScope,
    context: &TurnContext,
    storage: Option<&dyn Storage>,
) -> Result<bool> {
    let (Some(key), Some(storage)) = (scope.storage_key(context)?, storage) else {
        return Ok(false);
    };

    let deleted = storage.delete(&key).await?;
    debug!(key = %key, scope = ?scope, deleted = deleted, "State deleted");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn context() -> TurnContext {
        TurnContext::new("telegram", "bot", "42", "7")
    }

    #[test]
    fn test_storage_keys() {
        let context = context();
        assert_eq!(
            StateScope::Conversation.storage_key(&context).unwrap().as_deref(),
            Some("telegram/bot/conversations/42")
        );
        assert_eq!(
            StateScope::User.storage_key(&context).unwrap().as_deref(),
            Some("telegram/bot/users/7")
        );
        assert_eq!(StateScope::Temp.storage_key(&context).unwrap(), None);
    }

    #[test]
    fn test_missing_identity() {
        let mut context = context();
        context.user_id = None;
        assert_matches!(
            StateScope::User.storage_key(&context),
            Err(AssistantBotError::MissingIdentity { field: "user_id" })
        );
        assert!(StateScope::Conversation.storage_key(&context).is_ok());

        context.conversation_id = Some(String::new());
        assert_matches!(
            StateScope::Conversation.storage_key(&context),
            Err(AssistantBotError::MissingIdentity { field: "conversation_id" })
        );

        context.bot_id.clear();
        assert_matches!(
            StateScope::Conversation.storage_key(&context),
            Err(AssistantBotError::MissingIdentity { field: "bot_id" })
        );
    }

    #[test]
    fn test_temp_scope_needs_no_identity() {
        let context = TurnContext {
            channel_id: String::new(),
            bot_id: String::new(),
            conversation_id: None,
            user_id: None,
            activity_id: "1".to_string(),
            text: None,
        };
        assert_eq!(StateScope::Temp.storage_key(&context).unwrap(), None);
    }
}
