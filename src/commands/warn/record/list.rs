use serenity::builder::{
    CreateCommandOption, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter,
    EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;

use crate::commands::options::{int_option, user_option};
use crate::model::AppState;
use crate::registry::routing::leaf_options;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

const PAGE_SIZE: usize = 10;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Lists the warnings recorded against a member.")
            .option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "user",
                    "The member to check warnings for",
                )
                .required(true),
            )
            .option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "page",
                    "Warning page number",
                )
                .min_int_value(1),
            ),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();

    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let options = leaf_options(&interaction.data.options);
    let Some(user) = user_option(options, "user") else {
        reply_error(ctx, interaction, "A member is required.").await;
        return;
    };
    let page = int_option(options, "page").unwrap_or(1).max(1) as usize;

    let warnings = state.warnings_for(user).await;
    if warnings.is_empty() {
        reply_error(ctx, interaction, "This member does not have any warnings.").await;
        return;
    }

    let num_pages = warnings.len().div_ceil(PAGE_SIZE);
    if page > num_pages {
        reply_error(
            ctx,
            interaction,
            &format!("This page does not exist. There are {num_pages} pages available."),
        )
        .await;
        return;
    }

    let average = warnings
        .iter()
        .map(|warning| f64::from(warning.severity))
        .sum::<f64>()
        / warnings.len() as f64;

    let (name, face) = match user.to_user(&ctx.http).await {
        Ok(user) => (user.name.clone(), user.face()),
        Err(_) => (user.to_string(), String::new()),
    };
    let mut author = CreateEmbedAuthor::new(format!("{name}'s warnings"));
    if !face.is_empty() {
        author = author.icon_url(face);
    }

    let mut embed = CreateEmbed::new()
        .author(author)
        .color(ui::severity_color(average))
        .footer(CreateEmbedFooter::new(format!("Page {page}/{num_pages}")));

    // Newest first, ten per page.
    for warning in warnings
        .iter()
        .rev()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
    {
        embed = embed.field(
            warning.reason.clone(),
            format!(
                "{} severity {} • issued by <@{}> {}",
                ui::severity_emoji(warning.severity),
                warning.severity,
                warning.moderator,
                ui::relative_timestamp(warning.issued_at),
            ),
            false,
        );
    }

    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}

async fn reply_error(ctx: &Context, interaction: &CommandInteraction, text: &str) {
    interaction
        .edit_response(
            &ctx.http,
            EditInteractionResponse::new().embed(ui::error_embed("Warnings", text)),
        )
        .await
        .ok();
}
