//! Bot flow integration tests
//!
//! Drives the task commands through the same path the Telegram handlers use,
//! without a Telegram connection.

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use AssistantBot::handlers::commands::reply_to_command;
use AssistantBot::handlers::messages::reply_to_message;
use AssistantBot::handlers::{AppContext, Command};
use AssistantBot::state::{AppTurnState, MemoryStorage, Storage};
use AssistantBot::{AssistantBotError, Settings};

fn create_app() -> (AppContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let app = AppContext::new(Settings::default(), storage.clone(), test_bot_id());
    (app, storage)
}

#[tokio::test]
async fn test_task_lifecycle() {
    let (app, storage) = create_app();
    let turn = test_turn();

    let reply = reply_to_command(&app, &turn, Command::Tasks).await.unwrap();
    assert!(reply.starts_with("No tasks yet"));

    let reply = reply_to_command(&app, &turn, Command::CreateTask("Plan offsite | pick a venue".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "✅ Task \"Plan offsite\" created.");

    let reply = reply_to_command(&app, &turn, Command::CreateTask("Book flights".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "✅ Task \"Book flights\" created.");

    let reply = reply_to_command(&app, &turn, Command::CreateTask("Book flights | economy".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "✏️ Task \"Book flights\" updated.");

    let reply = reply_to_command(&app, &turn, Command::Tasks).await.unwrap();
    assert_eq!(
        reply,
        "📋 Tasks (2)\n• Book flights - economy\n• Plan offsite - pick a venue"
    );

    let reply = reply_to_command(&app, &turn, Command::DeleteTask("Book flights".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "🗑 Task \"Book flights\" deleted.");

    let reply = reply_to_command(&app, &turn, Command::DeleteTask("Book flights".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "There is no task called \"Book flights\".");

    let state = AppTurnState::load(&turn, Some(&*storage)).await.unwrap();
    assert_eq!(state.conversation().task_titles(), vec!["Plan offsite"]);
}

#[tokio::test]
async fn test_tasks_are_scoped_to_conversation() {
    let (app, _storage) = create_app();

    reply_to_command(&app, &test_turn(), Command::CreateTask("Private".to_string()))
        .await
        .unwrap();

    let reply = reply_to_command(&app, &other_turn(), Command::Tasks).await.unwrap();
    assert!(reply.starts_with("No tasks yet"));
}

#[tokio::test]
async fn test_reset_removes_conversation_record() {
    let (app, storage) = create_app();
    let turn = test_turn();

    reply_to_command(&app, &turn, Command::CreateTask("Plan offsite".to_string()))
        .await
        .unwrap();
    reply_to_message(&app, &turn).await.unwrap();
    assert!(storage.keys().await.contains(&conversation_key(&turn)));

    let reply = reply_to_command(&app, &turn, Command::Reset).await.unwrap();
    assert_eq!(reply, "Conversation state cleared.");

    let keys = storage.keys().await;
    assert!(!keys.contains(&conversation_key(&turn)));
    assert!(keys.contains(&user_key(&turn)));
}

#[tokio::test]
async fn test_reset_clears_unreadable_record() {
    let (app, storage) = create_app();
    let turn = test_turn();
    storage
        .write(&conversation_key(&turn), &json!({"tasks": ["not", "a", "map"]}))
        .await
        .unwrap();

    let result = reply_to_command(&app, &turn, Command::Tasks).await;
    assert_matches!(result, Err(AssistantBotError::Serialization(_)));

    let reply = reply_to_command(&app, &turn, Command::Reset).await.unwrap();
    assert_eq!(reply, "Conversation state cleared.");
    assert_eq!(storage.read(&conversation_key(&turn)).await.unwrap(), None);

    let reply = reply_to_command(&app, &turn, Command::Tasks).await.unwrap();
    assert!(reply.starts_with("No tasks yet"));
}

#[tokio::test]
async fn test_invalid_delete_is_answered() {
    let (app, storage) = create_app();

    let reply = reply_to_command(&app, &test_turn(), Command::DeleteTask("   ".to_string()))
        .await
        .unwrap();
    assert_eq!(reply, "Usage: /deletetask <title>");
    assert!(storage.is_empty().await);
}
