use chrono::Utc;
use serenity::builder::{
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;

use crate::commands::options::{int_option, str_option, user_option};
use crate::model::{AppState, Warning};
use crate::registry::routing::leaf_options;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Issues a warning to a member.")
            .option(
                CreateCommandOption::new(CommandOptionType::User, "user", "The member to warn")
                    .required(true),
            )
            .option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "reason",
                    "Reason for the warning",
                )
                .required(true),
            )
            .option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "severity",
                    "Severity from 1 (minor) to 10 (severe)",
                )
                .min_int_value(1)
                .max_int_value(10),
            ),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let options = leaf_options(&interaction.data.options);
    let (Some(user), Some(reason)) = (user_option(options, "user"), str_option(options, "reason"))
    else {
        respond(
            ctx,
            interaction,
            ui::error_embed("Warn", "A member and a reason are required."),
        )
        .await;
        return;
    };
    let severity = int_option(options, "severity").unwrap_or(5).clamp(1, 10) as u8;

    let warning = Warning {
        moderator: interaction.user.id,
        reason: reason.to_string(),
        severity,
        issued_at: Utc::now(),
    };
    let count = state.record_warning(user, warning).await;

    let plural = if count == 1 { "" } else { "s" };
    let embed = ui::info_embed(
        "Warning issued",
        format!("<@{user}> now has {count} warning{plural}."),
    )
    .field("Reason", reason.to_string(), false)
    .field(
        "Severity",
        format!("{} {severity}", ui::severity_emoji(severity)),
        true,
    );
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
