//! AssistantBot Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use teloxide::{prelude::*, types::Update};
use teloxide::dispatching::UpdateHandler;
use tracing::{info, warn, error};

use AssistantBot::{
    config::Settings,
    utils::logging,
    state::connect_storage,
    handlers::{AppContext, Command, handle_command, handle_message},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", AssistantBot::info());

    // Initialize state storage
    let storage = connect_storage(&settings.storage).await?;

    // Initialize bot
    let bot = Bot::new(&settings.bot.token);
    let bot_id = if settings.bot.bot_id.is_empty() {
        bot.get_me().await?.id.0.to_string()
    } else {
        settings.bot.bot_id.clone()
    };
    info!(bot_id = %bot_id, "Bot identity resolved");

    let app = Arc::new(AppContext::new(settings, storage, bot_id));

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![app])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("AssistantBot is ready!");
    dispatcher.dispatch().await;

    info!("AssistantBot has been shut down.");
    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    Update::filter_message()
        .branch(
            // Handle commands
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_commands)
        )
        .branch(
            // Handle regular text messages
            dptree::filter(|msg: Message| msg.text().is_some())
                .endpoint(handle_messages)
        )
}

/// Handle bot commands
async fn handle_commands(bot: Bot, msg: Message, cmd: Command, app: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = handle_command(bot, msg, cmd, &app).await {
        error!(error = %e, severity = %e.severity(), "Error handling command");
        return Err(e.into());
    }

    Ok(())
}

/// Handle regular messages
async fn handle_messages(bot: Bot, msg: Message, app: Arc<AppContext>) -> HandlerResult {
    if let Err(e) = handle_message(bot, msg, &app).await {
        error!(error = %e, severity = %e.severity(), "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
