use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

use crate::model::ShardManagerContainer;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Checks the bot's heartbeat latency."),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let latency = {
        let data = ctx.data.read().await;
        match data.get::<ShardManagerContainer>() {
            Some(shard_manager) => {
                let runners = shard_manager.runners.lock().await;
                runners.get(&ctx.shard_id).and_then(|runner| runner.latency)
            }
            None => None,
        }
    };

    let response = match latency {
        Some(latency) => format!("Pong! Heartbeat latency: `{} ms`", latency.as_millis()),
        None => "Pong! Heartbeat latency: `N/A`".to_string(),
    };
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().content(response),
            ),
        )
        .await
        .ok();
}
