use serenity::builder::{CreateCommandOption, EditChannel, EditInteractionResponse};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;
use tracing::warn;

use crate::commands::options::int_option;
use crate::registry::routing::leaf_options;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{CommandData, CommandUnit};
use crate::ui;

// Discord caps the per-user rate limit at six hours.
const MAX_SLOWMODE_SECONDS: i64 = 21_600;

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Enables slow mode in the channel.").option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "time",
                "Time for slowmode in seconds. 0 = off",
            )
            .required(true)
            .min_int_value(0)
            .max_int_value(MAX_SLOWMODE_SECONDS as u64),
        ),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer(&ctx.http).await.ok();

    let options = leaf_options(&interaction.data.options);
    let seconds = int_option(options, "time")
        .unwrap_or(0)
        .clamp(0, MAX_SLOWMODE_SECONDS) as u16;

    if let Err(e) = interaction
        .channel_id
        .edit(&ctx.http, EditChannel::new().rate_limit_per_user(seconds))
        .await
    {
        warn!(target: "commands.staff", error = %e, channel = interaction.channel_id.get(), "slowmode edit failed");
        interaction
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new()
                    .embed(ui::error_embed("Slowmode", "Could not update this channel.")),
            )
            .await
            .ok();
        return;
    }

    let title = if seconds > 0 { "Slowmode enabled" } else { "Slowmode disabled" };
    let mut embed = ui::success_embed(title, "Per-user message rate limit updated.");
    if seconds > 0 {
        embed = embed.field("Time (seconds)", seconds.to_string(), true);
    }
    interaction
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await
        .ok();
}
