//! Command handlers module
//!
//! This module contains handlers for all bot commands like /tasks, /help, etc.

pub mod help;
pub mod tasks;

use teloxide::{Bot, types::Message, prelude::*, utils::command::BotCommands};
use tracing::{debug, warn};
use crate::state::TurnContext;
use crate::utils::errors::{AssistantBotError, Result};
use super::{run_turn, AppContext};

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "AssistantBot commands:")]
pub enum Command {
    #[command(description = "Show help information")]
    Help,
    #[command(description = "List the tasks of this conversation")]
    Tasks,
    #[command(description = "Create a task: /createtask <title> | <description>")]
    CreateTask(String),
    #[command(description = "Delete a task: /deletetask <title>")]
    DeleteTask(String),
    #[command(description = "Forget everything stored for this conversation")]
    Reset,
}

/// Compute the reply to a command for the given turn
pub async fn reply_to_command(app: &AppContext, turn: &TurnContext, cmd: Command) -> Result<String> {
    let result = match cmd {
        Command::Help => Ok(help::help_text()),
        Command::Tasks => run_turn(app, turn, tasks::list_tasks).await,
        Command::CreateTask(args) => run_turn(app, turn, move |state| tasks::create_task(state, &args)).await,
        Command::DeleteTask(title) => run_turn(app, turn, move |state| tasks::delete_task(state, &title)).await,
        Command::Reset => tasks::reset(turn, app.storage.as_ref()).await,
    };

    match result {
        Err(AssistantBotError::InvalidInput(reason)) => {
            debug!(activity_id = %turn.activity_id, reason = %reason, "Rejected command input");
            Ok(reason)
        }
        other => other,
    }
}

/// Main command dispatcher
pub async fn handle_command(bot: Bot, msg: Message, cmd: Command, app: &AppContext) -> Result<()> {
    let turn = TurnContext::from_message(&app.bot_id, &msg);
    debug!(activity_id = %turn.activity_id, command = ?cmd, "Processing command");

    let reply = match reply_to_command(app, &turn, cmd).await {
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
