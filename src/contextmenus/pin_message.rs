use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;
use tracing::warn;

use crate::registry::source::SourceUnit;
use crate::registry::unit::ContextMenuUnit;

pub fn entry() -> SourceUnit {
    SourceUnit::context_menu(
        file!(),
        ContextMenuUnit::message("Pin Message", |ctx, interaction| {
            Box::pin(run(ctx, interaction))
        }),
    )
}

async fn run(ctx: &Context, interaction: &CommandInteraction) {
    let Some(target) = interaction.data.target_id else {
        return;
    };

    let content = match interaction
        .channel_id
        .pin(&ctx.http, target.to_message_id())
        .await
    {
        Ok(()) => "Message pinned.".to_string(),
        Err(e) => {
            warn!(target: "contextmenus", error = %e, channel = interaction.channel_id.get(), "pin failed");
            "Could not pin this message; the pin list may be full.".to_string()
        }
    };

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .ephemeral(true),
            ),
        )
        .await
        .ok();
}
