//! Turn state
//!
//! `TurnState` bundles the conversation, user and temp state of one turn.
//! It can only be built by loading all three against the same turn context,
//! so a value of this type is never partially populated.

use std::time::Instant;
use tracing::debug;
use crate::utils::errors::Result;
use crate::utils::logging::log_turn_loaded;
use super::context::TurnContext;
use super::conversation::AppConversationState;
use super::scope::{delete_scoped, load_scoped, save_scoped, ScopedState};
use super::storage::Storage;
use super::temp::TempState;
use super::user::UserState;

/// Conversation, user and temp state of a single turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnState<C, U, T> {
    conversation: C,
    user: U,
    temp: T,
    conversation_deleted: bool,
}

/// Turn state used by the assistant bot
pub type AppTurnState = TurnState<AppConversationState, UserState, TempState>;

impl<C, U, T> TurnState<C, U, T>
where
    C: ScopedState,
    U: ScopedState,
    T: ScopedState,
{
    /// Load all three sub-states for the turn, one after another.
    ///
    /// The first failing load aborts the whole operation.
    pub async fn load(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        let started = Instant::now();
        let conversation = load_scoped::<C>(context, storage).await?;
        let user = load_scoped::<U>(context, storage).await?;
        let temp = load_scoped::<T>(context, storage).await?;

        log_turn_loaded(context, u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
        Ok(Self::assemble(conversation, user, temp))
    }

    /// Load all three sub-states for the turn concurrently.
    ///
    /// Same contract as [`TurnState::load`]; only use it with backends that
    /// serve concurrent reads of distinct keys.
    pub async fn load_concurrent(context: &TurnContext, storage: Option<&dyn Storage>) -> Result<Self> {
        let started = Instant::now();
        let (conversation, user, temp) = futures::try_join!(
            load_scoped::<C>(context, storage),
            load_scoped::<U>(context, storage),
            load_scoped::<T>(context, storage),
        )?;

        log_turn_loaded(context, u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
        Ok(Self::assemble(conversation, user, temp))
    }

    fn assemble(conversation: C, user: U, temp: T) -> Self {
        Self {
            conversation,
            user,
            temp,
            conversation_deleted: false,
        }
    }

    /// Persist conversation and user state. Temp state is never written.
    pub async fn save(&mut self, context: &TurnContext, storage: Option<&dyn Storage>) -> Result<()> {
        if storage.is_none() {
            debug!("No storage configured, skipping turn state save");
            return Ok(());
        }

        if self.conversation_deleted {
            delete_scoped(C::SCOPE, context, storage).await?;
            self.conversation_deleted = false;
        } else {
            self.conversation.touch();
            save_scoped(&self.conversation, context, storage).await?;
        }

        self.user.touch();
        save_scoped(&self.user, context, storage).await?;
        Ok(())
    }

    /// Reset conversation state and remove its record on the next save
    pub fn delete_conversation_state(&mut self) {
        self.conversation = C::default();
        self.conversation_deleted = true;
    }

    pub fn conversation(&self) -> &C {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut C {
        self.conversation_deleted = false;
        &mut self.conversation
    }

    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut U {
        &mut self.user
    }

    pub fn temp(&self) -> &T {
        &self.temp
    }

    pub fn temp_mut(&mut self) -> &mut T {
        &mut self.temp
    }

    /// Split into the three sub-states
    pub fn into_parts(self) -> (C, U, T) {
        (self.conversation, self.user, self.temp)
    }
}
