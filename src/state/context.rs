//! Turn context
//!
//! A `TurnContext` describes one inbound activity: which channel and bot it
//! arrived on, which conversation and user it belongs to, and its text.
//! State scopes derive their storage keys from these identities.

use teloxide::types::Message;
use uuid::Uuid;

/// Channel identifier used for Telegram activities
pub const TELEGRAM_CHANNEL: &str = "telegram";

/// Identity and payload of the inbound turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    /// Channel the activity arrived on
    pub channel_id: String,
    /// Bot receiving the activity
    pub bot_id: String,
    /// Conversation thread the activity belongs to
    pub conversation_id: Option<String>,
    /// User who sent the activity
    pub user_id: Option<String>,
    /// Unique id of the activity
    pub activity_id: String,
    /// Activity text, if any
    pub text: Option<String>,
}

impl TurnContext {
    /// Create a context for a message from `user_id` in `conversation_id`
    pub fn new(
        channel_id: impl Into<String>,
        bot_id: impl Into<String>,
        conversation_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            bot_id: bot_id.into(),
            conversation_id: Some(conversation_id.into()),
            user_id: Some(user_id.into()),
            activity_id: Uuid::new_v4().to_string(),
            text: None,
        }
    }

    /// Build a context from an incoming Telegram message.
    ///
    /// Channel posts carry no sender, so `user_id` is `None` for them.
    pub fn from_message(bot_id: &str, msg: &Message) -> Self {
        Self {
            channel_id: TELEGRAM_CHANNEL.to_string(),
            bot_id: bot_id.to_string(),
            conversation_id: Some(msg.chat.id.0.to_string()),
            user_id: msg.from.as_ref().map(|user| user.id.0.to_string()),
            activity_id: format!("{}:{}", msg.chat.id.0, msg.id.0),
            text: msg.text().map(str::to_string),
        }
    }

    /// Attach activity text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Conversation id, if present and non-empty
    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref().filter(|id| !id.is_empty())
    }

    /// User id, if present and non-empty
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }
}
