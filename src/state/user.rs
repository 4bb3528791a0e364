//! User state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::utils::errors::Result;
use super::context::TurnContext;
use super::scope::{load_scoped, ScopedState, StateScope, StateValues};
use super::storage::Storage;

/// User-scoped state, shared by every conversation of one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl UserState {
    /// Load the user record for the turn
    pub async fn load(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        load_scoped(context, storage).await
    }
}

impl ScopedState for UserState {
    const SCOPE: StateScope = StateScope::User;

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl StateValues for UserState {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_operations() {
        let mut state = UserState::default();
        state.set_value("name", "Ada").unwrap();
        state.set_value("visits", 3).unwrap();

        assert_eq!(state.value::<String>("name").unwrap(), Some("Ada".to_string()));
        assert_eq!(state.value::<i64>("visits").unwrap(), Some(3));
        assert!(state.value::<i64>("name").is_err());

        assert!(state.remove_value("visits").is_some());
        assert_eq!(state.value::<i64>("visits").unwrap(), None);
    }
}
