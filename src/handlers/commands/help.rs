//! Help command handler

/// Reply to /help
pub fn help_text() -> String {
    "🤖 AssistantBot Help\n\n\
        /tasks - List the tasks of this conversation\n\
        /createtask <title> | <description> - Create or update a task\n\
        /deletetask <title> - Delete a task\n\
        /reset - Forget everything stored for this conversation\n\
        /help - Show this help message"
        .to_string()
}
