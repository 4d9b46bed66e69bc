use serenity::builder::{
    CreateCommandOption, CreateEmbed, CreateEmbedAuthor, CreateMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;
use tracing::{instrument, warn};

use crate::commands::options::{bool_option, str_option, user_option};
use crate::model::AppState;
use crate::registry::routing::leaf_options;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Bans a member.")
            .option(
                CreateCommandOption::new(CommandOptionType::User, "user", "The member to ban")
                    .required(true),
            )
            .option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "purge",
                "Whether to delete the member's recent messages",
            ))
            .option(CreateCommandOption::new(
                CommandOptionType::String,
                "reason",
                "Reason for banning",
            ))
            .option(CreateCommandOption::new(
                CommandOptionType::Boolean,
                "noappeal",
                "Don't include appeal instructions in the notification",
            )),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

#[instrument(level = "info", skip(ctx, interaction), fields(moderator = interaction.user.id.get()))]
async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();

    let Some(guild_id) = interaction.guild_id else {
        reply_error(ctx, interaction, "Only available inside a server.").await;
        return;
    };
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let options = leaf_options(&interaction.data.options);
    let Some(user) = user_option(options, "user") else {
        reply_error(ctx, interaction, "A member to ban is required.").await;
        return;
    };
    let purge = bool_option(options, "purge").unwrap_or(false);
    let no_appeal = bool_option(options, "noappeal").unwrap_or(false);
    let reason = str_option(options, "reason").unwrap_or("None provided").to_string();

    let Ok(member) = guild_id.member(&ctx.http, user).await else {
        reply_error(
            ctx,
            interaction,
            "Could not find this member. They may have already been banned or left.",
        )
        .await;
        return;
    };
    if member.user.bot || state.is_staff(&member) {
        reply_error(ctx, interaction, "You cannot ban a staff member or bot.").await;
        return;
    }

    let mut dm = CreateEmbed::new()
        .author(CreateEmbedAuthor::new(member.display_name()).icon_url(member.user.face()))
        .description("You have been banned from the server.")
        .field("Reason", reason.clone(), false)
        .color(ui::COLOR_ALERT);
    if !no_appeal {
        dm = dm.field(
            "Appeal",
            "You may appeal your ban by contacting the staff team.",
            false,
        );
    }
    // Has to go out before the ban; the bot cannot DM a user once they no
    // longer share a guild.
    member
        .user
        .dm(&ctx.http, CreateMessage::new().embed(dm))
        .await
        .ok();

    let delete_days = if purge { 7 } else { 0 };
    if let Err(e) = guild_id
        .ban_with_reason(&ctx.http, user, delete_days, &reason)
        .await
    {
        warn!(target: "commands.staff", error = %e, user = user.get(), "ban failed");
        reply_error(ctx, interaction, "Could not ban this member.").await;
        return;
    }

    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new()
                .embed(ui::success_embed("Ban", format!("<@{user}> was banned."))),
        )
        .await
        .ok();
}

async fn reply_error(ctx: &Context, interaction: &CommandInteraction, text: &str) {
    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(ui::error_embed("Ban", text)),
        )
        .await
        .ok();
}
