//! Message handlers module
//!
//! Handles plain text messages that are not commands. The text is recorded
//! as the turn input and the user is pointed at the task commands.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, warn};
use crate::state::{StateValues, TurnContext};
use crate::utils::errors::{AssistantBotError, Result};
use super::{run_turn, AppContext};

const MESSAGE_COUNT_KEY: &str = "message_count";

/// Compute the reply to a plain text message for the given turn
pub async fn reply_to_message(app: &AppContext, turn: &TurnContext) -> Result<String> {
    run_turn(app, turn, |state| {
        let count = state.user().value::<u64>(MESSAGE_COUNT_KEY)?.unwrap_or(0) + 1;
        state.user_mut().set_value(MESSAGE_COUNT_KEY, count)?;

        let input = state.temp().input.as_deref().unwrap_or_default().trim();
        let reply = if input.is_empty() {
            "Send /help to see what I can do.".to_string()
        } else {
            format!(
                "I keep a task list for this chat. Try /createtask {} | <description>",
                input
            )
        };
        Ok(reply)
    })
    .await
}

/// Handle a plain text message
pub async fn handle_message(bot: Bot, msg: Message, app: &AppContext) -> Result<()> {
    let turn = TurnContext::from_message(&app.bot_id, &msg);
    debug!(activity_id = %turn.activity_id, "Processing message");

    let reply = match reply_to_message(app, &turn).await {
        Ok(reply) => reply,
        Err(AssistantBotError::MissingIdentity { field }) => {
            warn!(activity_id = %turn.activity_id, field = field, "Cannot key state for message");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
