//! Temp state
//!
//! Per-turn scratch space. It is rebuilt from the turn context on every
//! load and never written to storage.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::utils::errors::Result;
use super::context::TurnContext;
use super::scope::{load_scoped, ScopedState, StateScope};
use super::storage::Storage;

/// Single-turn state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempState {
    /// Text of the inbound activity
    pub input: Option<String>,
    /// Last reply produced during the turn
    pub last_output: Option<String>,
    /// Results of actions run during the turn, by action name
    pub action_outputs: HashMap<String, String>,
    /// Tokens acquired during the turn, by connection name
    pub auth_tokens: HashMap<String, String>,
}

impl TempState {
    /// Build the temp state for the turn
    pub async fn load(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        load_scoped(context, storage).await
    }
}

impl ScopedState for TempState {
    const SCOPE: StateScope = StateScope::Temp;

    fn hydrate(&mut self, context: &TurnContext) {
        self.input = context.text.clone();
    }
}
