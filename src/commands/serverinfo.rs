use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Shows information about this server."),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(guild_id) = interaction.guild_id else {
        respond(ctx, interaction, ui::error_embed("Server info", "Only available inside a server.")).await;
        return;
    };

    // Copy what we need out of the cache before awaiting anything.
    let cached = ctx
        .cache
        .guild(guild_id)
        .map(|guild| (guild.name.clone(), guild.member_count));

    let Some((name, member_count)) = cached else {
        respond(ctx, interaction, ui::error_embed("Server info", "This server is not cached yet.")).await;
        return;
    };

    let created = format!("<t:{}:R>", guild_id.created_at().unix_timestamp());
    let embed = ui::info_embed(name, format!("Server ID: `{guild_id}`"))
        .field("Members", member_count.to_string(), true)
        .field("Created", created, true);
    respond(ctx, interaction, embed).await;
}

async fn respond(
    ctx: &Context,
    interaction: &CommandInteraction,
    embed: serenity::builder::CreateEmbed,
) {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new().embed(embed),
            ),
        )
        .await
        .ok();
}
