//! Task command handlers
//!
//! Each handler mutates the turn's conversation state and returns the reply
//! text. `run_turn` takes care of loading and saving. `/reset` works on the
//! stored record directly, so it still clears records that no longer load.

use crate::state::{delete_scoped, AppTurnState, StateScope, Storage, TurnContext};
use crate::utils::errors::{AssistantBotError, Result};
use crate::utils::logging::log_task_action;
use tracing::debug;

/// Handle /tasks
pub fn list_tasks(state: &mut AppTurnState) -> Result<String> {
    let conversation = state.conversation();
    if conversation.task_count() == 0 {
        return Ok("No tasks yet. Add one with /createtask <title> | <description>".to_string());
    }

    let mut lines = vec![format!("📋 Tasks ({})", conversation.task_count())];
    for title in conversation.task_titles() {
        // Entries written by other clients may not follow the task shape
        let line = match conversation.task(title) {
            Ok(Some(task)) if !task.description.is_empty() => {
                format!("• {} - {}", task.title, task.description)
            }
            _ => format!("• {}", title),
        };
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

/// Handle /createtask <title> | <description>
pub fn create_task(state: &mut AppTurnState, args: &str) -> Result<String> {
    let (title, description) = match args.split_once('|') {
        Some((title, description)) => (title.trim(), description.trim()),
        None => (args.trim(), ""),
    };

    let replaced = state.conversation().tasks.as_ref().map_or(false, |tasks| tasks.contains_key(title));
    state.conversation_mut().create_task(title, description)?;
    log_task_action("create", title, state.conversation().task_count());

    if replaced {
        Ok(format!("✏️ Task \"{}\" updated.", title))
    } else {
        Ok(format!("✅ Task \"{}\" created.", title))
    }
}

/// Handle /deletetask <title>
pub fn delete_task(state: &mut AppTurnState, title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AssistantBotError::InvalidInput("Usage: /deletetask <title>".to_string()));
    }

    if state.conversation_mut().delete_task(title) {
        log_task_action("delete", title, state.conversation().task_count());
        Ok(format!("🗑 Task \"{}\" deleted.", title))
    } else {
        Ok(format!("There is no task called \"{}\".", title))
    }
}

/// Handle /reset
pub async fn reset(turn: &TurnContext, storage: &dyn Storage) -> Result<String> {
    let deleted = delete_scoped(StateScope::Conversation, turn, Some(storage)).await?;
    log_task_action("reset", "", 0);
    debug!(activity_id = %turn.activity_id, deleted = deleted, "Conversation record reset");
    Ok("Conversation state cleared.".to_string())
}
