use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::model::application::CommandInteraction;
use serenity::prelude::Context;

use crate::model::AppState;
use crate::registry::source::SourceUnit;
use crate::registry::unit::ContextMenuUnit;
use crate::ui;

pub fn entry() -> SourceUnit {
    SourceUnit::context_menu(
        file!(),
        ContextMenuUnit::user("View Warnings", |ctx, interaction| {
            Box::pin(run(ctx, interaction))
        }),
    )
}

async fn run(ctx: &Context, interaction: &CommandInteraction) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let Some(target) = interaction.data.target_id else {
        return;
    };
    let user = target.to_user_id();

    let warnings = state.warnings_for(user).await;
    let embed = if warnings.is_empty() {
        ui::info_embed("Warnings", format!("<@{user}> has no warnings."))
    } else {
        let plural = if warnings.len() == 1 { "" } else { "s" };
        let mut embed = ui::info_embed(
            "Warnings",
            format!("<@{user}> has {} warning{plural}.", warnings.len()),
        );
        // Newest first; the slash command pages through the rest.
        for warning in warnings.iter().rev().take(10) {
            embed = embed.field(
                warning.reason.clone(),
                format!(
                    "{} severity {} {}",
                    ui::severity_emoji(warning.severity),
                    warning.severity,
                    ui::relative_timestamp(warning.issued_at),
                ),
                false,
            );
        }
        embed
    };

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .ephemeral(true),
            ),
        )
        .await
        .ok();
}
