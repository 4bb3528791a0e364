//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the AssistantBot application.

use tracing::{info, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::state::TurnContext;
use crate::utils::errors::{AssistantBotError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "assistantbot.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init()
        .map_err(|e| AssistantBotError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed turn state load
pub fn log_turn_loaded(context: &TurnContext, duration_ms: u64) {
    debug!(
        channel_id = %context.channel_id,
        conversation_id = context.conversation_id(),
        user_id = context.user_id(),
        activity_id = %context.activity_id,
        duration_ms = duration_ms,
        "Turn state loaded"
    );
}

/// Log task actions with structured data
pub fn log_task_action(action: &str, title: &str, task_count: usize) {
    info!(
        action = action,
        title = title,
        task_count = task_count,
        "Task action performed"
    );
}

/// Log storage errors with context
pub fn log_storage_error(operation: &str, key: &str, error: &AssistantBotError) {
    error!(
        operation = operation,
        key = key,
        error = %error,
        severity = %error.severity(),
        recoverable = error.is_recoverable(),
        "Storage operation failed"
    );
}
