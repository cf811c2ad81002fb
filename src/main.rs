use anyhow::Result;
use inline_translator_bot::{
    bot::Bot,
    config::{Config, ConfigError},
    server,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("inline_translator_bot=info".parse()?),
        )
        .init();

    info!("Starting inline translation bot");

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Some(ConfigError::MissingCredential(var)) = e.downcast_ref::<ConfigError>() {
                error!("⚠️  {} is not set. The bot cannot start without it.", var);
                error!("💡 Set it before starting the bot:");
                error!("   Linux/Mac: export {}='your_token_here'", var);
                error!("   Windows:   set {}=your_token_here", var);
                error!("   Or put {}=your_token_here in a .env file", var);
            } else {
                error!("Invalid configuration: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    info!(
        "Default language: {}, secondary: {:?} (max {}), provider timeout: {:?}",
        config.default_language,
        config
            .secondary_languages
            .iter()
            .map(|l| l.code())
            .collect::<Vec<_>>(),
        config.max_secondary_translations,
        config.translate_timeout
    );

    // Health server runs independently of the bot
    tokio::spawn(server::serve(config.port));

    let client = reqwest::Client::new();
    let mut bot = Bot::from_config(&config, client);

    match bot.telegram().get_me().await {
        Ok(username) => {
            info!("🤖 Logged in as @{}", username);
            bot = bot.with_username(username);
        }
        Err(e) => warn!("Could not fetch bot username: {:#}", e),
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    Arc::new(bot)
        .run_polling(config.poll_timeout_secs, shutdown)
        .await;

    info!("Bot stopped");
    Ok(())
}
