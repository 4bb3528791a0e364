//! Bot handlers module
//!
//! This module contains the Telegram bot handlers:
//! - Command handlers for the task commands
//! - Message handlers for plain text messages
//!
//! Every handler works on an `AppTurnState` loaded for the incoming message
//! and saved once the reply is decided.

pub mod commands;
pub mod messages;

use std::sync::Arc;
use tracing::debug;
use crate::config::Settings;
use crate::state::{AppTurnState, Storage, TurnContext};
use crate::utils::errors::Result;

pub use commands::{handle_command, Command};
pub use messages::handle_message;

/// Application-wide context shared by all handlers
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub storage: Arc<dyn Storage>,
    /// Bot identifier used in storage keys
    pub bot_id: String,
}

impl AppContext {
    pub fn new(settings: Settings, storage: Arc<dyn Storage>, bot_id: impl Into<String>) -> Self {
        Self {
            settings,
            storage,
            bot_id: bot_id.into(),
        }
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("bot_id", &self.bot_id)
            .finish_non_exhaustive()
    }
}

/// Load turn state, let `handler` act on it, record its reply and save.
///
/// Nothing is saved when `handler` fails.
pub async fn run_turn<F>(app: &AppContext, turn: &TurnContext, handler: F) -> Result<String>
where
    F: FnOnce(&mut AppTurnState) -> Result<String> + Send,
{
    let storage = Some(app.storage.as_ref());
    let mut state = AppTurnState::load(turn, storage).await?;

    let reply = handler(&mut state)?;
    state.temp_mut().last_output = Some(reply.clone());

    state.save(turn, storage).await?;
    debug!(activity_id = %turn.activity_id, "Turn completed");
    Ok(reply)
}
