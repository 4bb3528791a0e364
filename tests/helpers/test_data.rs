//! Test data for turn state tests

#![allow(dead_code)]

use AssistantBot::TurnContext;
use serde_json::{json, Value};

pub fn test_bot_id() -> &'static str {
    "assistant-test"
}

pub fn test_conversation_id() -> &'static str {
    "-1001234567890"
}

pub fn test_user_id() -> &'static str {
    "987654321"
}

/// Turn context for the default test user in the default test chat
pub fn test_turn() -> TurnContext {
    TurnContext::new("telegram", test_bot_id(), test_conversation_id(), test_user_id())
        .with_text("hello")
}

/// Turn context for another user in another chat
pub fn other_turn() -> TurnContext {
    TurnContext::new("telegram", test_bot_id(), "-1009999999999", "123456789")
}

pub fn conversation_key(turn: &TurnContext) -> String {
    format!(
        "{}/{}/conversations/{}",
        turn.channel_id,
        turn.bot_id,
        turn.conversation_id.as_deref().unwrap_or_default()
    )
}

pub fn user_key(turn: &TurnContext) -> String {
    format!(
        "{}/{}/users/{}",
        turn.channel_id,
        turn.bot_id,
        turn.user_id.as_deref().unwrap_or_default()
    )
}

/// Arbitrary task payload with nested structure
pub fn sample_task_data() -> Value {
    json!({
        "title": "t1",
        "description": "prepare slides",
        "due": "2024-06-01",
        "tags": ["work", "urgent"],
        "estimate_hours": 2.5,
        "done": false
    })
}
