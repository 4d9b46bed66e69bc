use serenity::builder::{
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType};
use serenity::prelude::Context;

use crate::commands::options::{int_option, user_option};
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
        CommandData::new("Removes one of a member's warnings.")
            .option(
                CreateCommandOption::new(
                    CommandOptionType::User,
                    "user",
                    "The member whose warning to remove",
                )
                .required(true),
            )
            .option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "index",
                    "Warning number, oldest first (see /warn record list)",
                )
                .required(true)
                .min_int_value(1),
            ),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };

    let options = leaf_options(&interaction.data.options);
    let (Some(user), Some(index)) = (user_option(options, "user"), int_option(options, "index"))
    else {
        respond(
            ctx,
            interaction,
            ui::error_embed("Warn", "A member and a warning number are required."),
        )
        .await;
        return;
    };
    let index = index.max(1) as usize;

    match state.remove_warning(user, index - 1).await {
        Some(removed) => {
            let embed = ui::success_embed(
                "Warning removed",
                format!("Removed warning #{index} from <@{user}>."),
            )
            .field("Reason", removed.reason, false);
            respond(ctx, interaction, embed).await;
        }
        None => {
            respond(
                ctx,
                interaction,
                ui::error_embed("Warn", format!("That member has no warning #{index}.")),
            )
            .await;
        }
    }
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
