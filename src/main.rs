use std::sync::Arc;

use anyhow::Context as _;
use serenity::model::gateway::GatewayIntents;
use serenity::prelude::*;
use tracing::error;
use tracing_subscriber::EnvFilter;

use warden_bot::config::BotConfig;
use warden_bot::handler::Handler;
use warden_bot::model::{AppState, ShardManagerContainer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env().context("reading configuration from the environment")?;
    let app_state = Arc::new(AppState::new(config.staff_role_id));

    // Interactions arrive with GUILDS; the reaction intent feeds the
    // quick-approve listeners.
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let mut client = Client::builder(&config.token, intents)
        .event_handler(Handler {
            guild_id: config.guild_id,
            admin_role: config.staff_role_id,
        })
        .await
        .context("creating the Discord client")?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(client.shard_manager.clone());
        data.insert::<AppState>(app_state);
    }

    if let Err(why) = client.start().await {
        error!(target: "main", error = %why, "client error");
    }
    Ok(())
}
