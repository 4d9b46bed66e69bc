use serenity::builder::{CreateCommandOption, EditInteractionResponse, GetMessages};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;
use tracing::warn;

use crate::commands::options::int_option;
use crate::registry::routing::leaf_options;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Bulk-deletes recent messages in this channel.").option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "count",
                "How many messages to delete (max 100)",
            )
            .required(true)
            .min_int_value(1)
            .max_int_value(100),
        ),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer_ephemeral(&ctx.http).await.ok();

    let options = leaf_options(&interaction.data.options);
    let count = int_option(options, "count").unwrap_or(0).clamp(1, 100) as u8;

    let channel = interaction.channel_id;
    let messages = match channel
        .messages(&ctx.http, GetMessages::new().limit(count))
        .await
    {
        Ok(messages) => messages,
        Err(e) => {
            warn!(target: "commands.staff", error = %e, channel = channel.get(), "message fetch failed");
            reply(ctx, interaction, ui::error_embed("Purge", "Could not fetch messages.")).await;
            return;
        }
    };
    if messages.is_empty() {
        reply(ctx, interaction, ui::error_embed("Purge", "Nothing to delete.")).await;
        return;
    }

    let deleting = messages.len();
    if let Err(e) = channel
        .delete_messages(&ctx.http, messages.iter().map(|message| message.id))
        .await
    {
        warn!(target: "commands.staff", error = %e, channel = channel.get(), "bulk delete failed");
        reply(
            ctx,
            interaction,
            ui::error_embed(
                "Purge",
                "Could not delete messages. Messages older than two weeks cannot be bulk-deleted.",
            ),
        )
        .await;
        return;
    }

    reply(
        ctx,
        interaction,
        ui::success_embed("Purge", format!("Deleted {deleting} messages.")),
    )
    .await;
}

async fn reply(
    ctx: &Context,
    interaction: &CommandInteraction,
    embed: serenity::builder::CreateEmbed,
) {
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}
