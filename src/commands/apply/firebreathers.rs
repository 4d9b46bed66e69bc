//! `/apply firebreathers` posts an application for staff review. Staff
//! decide with the Accept/Deny buttons, or short-circuit by reacting with
//! the approve emoji on the application message.

use serenity::builder::{
    CreateActionRow, CreateButton, CreateEmbed, CreateEmbedAuthor, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, EditInteractionResponse, EditMessage,
};
use serenity::model::application::{ButtonStyle, CommandInteraction, ComponentInteraction};
use serenity::model::channel::{Embed, Reaction, ReactionType};
use serenity::model::id::UserId;
use serenity::prelude::Context;
use tracing::{debug, warn};

use crate::model::AppState;
use crate::registry::source::SourceUnit;
use crate::registry::unit::{custom_id_args, encode_custom_id, CommandData, CommandUnit};
use crate::ui;

/// Shared by submission and the listeners so the quick-approve path can
/// recognize application messages.
const APPLICATION_TITLE: &str = "Firebreathers application";
const DECIDE_KEY: &str = "fbAppDecide";
const QUICK_APPROVE_KEY: &str = "fbQuickApprove";

pub fn entry() -> SourceUnit {
    SourceUnit::command(file!(), unit())
}

fn unit() -> CommandUnit {
    CommandUnit::new(
        CommandData::new("Opens an application to the Firebreathers role."),
        |ctx, interaction| Box::pin(run_slash(ctx, interaction)),
    )
    .interaction_listener(DECIDE_KEY, |ctx, component| Box::pin(decide(ctx, component)))
    .reaction_listener(QUICK_APPROVE_KEY, |ctx, reaction| {
        Box::pin(quick_approve(ctx, reaction))
    })
}

async fn run_slash(ctx: &Context, interaction: &CommandInteraction) {
    interaction.defer_ephemeral(&ctx.http).await.ok();

    let Some(member) = interaction.member.as_deref() else {
        interaction
            .edit_response(
                &ctx.http,
                EditInteractionResponse::new().content("Only available inside a server."),
            )
            .await
            .ok();
        return;
    };

    let applicant = member.user.id;
    let embed = CreateEmbed::new()
        .title(APPLICATION_TITLE)
        .author(CreateEmbedAuthor::new(member.display_name()).icon_url(member.user.face()))
        .description(
            "A staff member will review this application. Decide with the \
             buttons below, or react with the approve emoji to accept directly.",
        )
        .field("Applicant", format!("<@{applicant}>"), true)
        .color(ui::COLOR_INFO);

    let applicant_arg = applicant.to_string();
    let buttons = CreateActionRow::Buttons(vec![
        CreateButton::new(encode_custom_id(DECIDE_KEY, &[&applicant_arg, "accept"]))
            .label("Accept")
            .style(ButtonStyle::Success),
        CreateButton::new(encode_custom_id(DECIDE_KEY, &[&applicant_arg, "deny"]))
            .label("Deny")
            .style(ButtonStyle::Danger),
    ]);

    let message = CreateMessage::new().embed(embed).components(vec![buttons]);
    match interaction.channel_id.send_message(&ctx.http, message).await {
        Ok(posted) => {
            posted
                .react(&ctx.http, ReactionType::Unicode(ui::EMOJI_APPROVE.to_string()))
                .await
                .ok();
            interaction
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new().content(
                        "Application submitted. Please allow a few days for it to be reviewed.",
                    ),
                )
                .await
                .ok();
        }
        Err(e) => {
            warn!(target: "commands.apply", error = %e, "failed to post application");
            interaction
                .edit_response(
                    &ctx.http,
                    EditInteractionResponse::new()
                        .content("Could not submit your application; try again later."),
                )
                .await
                .ok();
        }
    }
}

async fn decide(ctx: &Context, component: &ComponentInteraction) {
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    let staff = component
        .member
        .as_ref()
        .is_some_and(|member| state.is_staff(member));
    if !staff {
        component
            .create_response(
                &ctx.http,
                CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content("Only staff may decide applications.")
                        .ephemeral(true),
                ),
            )
            .await
            .ok();
        return;
    }

    let args = custom_id_args(&component.data.custom_id);
    let &[applicant_raw, verdict] = args.as_slice() else {
        debug!(
            target: "commands.apply",
            custom_id = %component.data.custom_id,
            "malformed decision custom id"
        );
        return;
    };
    let accepted = verdict == "accept";

    // Drop the buttons and recolor the original message.
    let updated = component
        .message
        .embeds
        .first()
        .cloned()
        .map(CreateEmbed::from)
        .unwrap_or_else(|| ui::info_embed(APPLICATION_TITLE, "Application record"))
        .color(if accepted { ui::COLOR_SUCCESS } else { ui::COLOR_ALERT })
        .field(
            "Decision",
            format!(
                "{} by <@{}>",
                if accepted { "Accepted" } else { "Denied" },
                component.user.id
            ),
            false,
        );
    component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .embed(updated)
                    .components(vec![]),
            ),
        )
        .await
        .ok();

    if let Ok(id) = applicant_raw.parse::<u64>() {
        if id != 0 {
            notify_applicant(ctx, UserId::new(id), accepted).await;
        }
    }
}

async fn quick_approve(ctx: &Context, reaction: &Reaction) {
    if !matches!(&reaction.emoji, ReactionType::Unicode(emoji) if emoji == ui::EMOJI_APPROVE) {
        return;
    }
    let Some(member) = &reaction.member else {
        return;
    };
    // The bot seeds the approve emoji on every application it posts.
    if member.user.bot {
        return;
    }
    let Some(state) = AppState::from_ctx(ctx).await else {
        return;
    };
    if !state.is_staff(member) {
        return;
    }

    let bot_id = ctx.cache.current_user().id;
    let Ok(mut message) = reaction.message(&ctx.http).await else {
        return;
    };
    if message.author.id != bot_id {
        return;
    }
    let is_application = message
        .embeds
        .first()
        .and_then(|embed| embed.title.as_deref())
        == Some(APPLICATION_TITLE);
    // Decided messages have had their buttons removed already.
    if !is_application || message.components.is_empty() {
        return;
    }

    let applicant = message.embeds.first().and_then(applicant_from_embed);
    let updated = message
        .embeds
        .first()
        .cloned()
        .map(CreateEmbed::from)
        .unwrap_or_else(|| ui::info_embed(APPLICATION_TITLE, "Application record"))
        .color(ui::COLOR_SUCCESS)
        .field(
            "Decision",
            format!("Accepted by <@{}> {}", member.user.id, ui::EMOJI_APPROVE),
            false,
        );
    if let Err(e) = message
        .edit(&ctx.http, EditMessage::new().embed(updated).components(vec![]))
        .await
    {
        warn!(target: "commands.apply", error = %e, "failed to update application message");
        return;
    }

    if let Some(applicant) = applicant {
        notify_applicant(ctx, applicant, true).await;
    }
}

async fn notify_applicant(ctx: &Context, applicant: UserId, accepted: bool) {
    let embed = if accepted {
        ui::success_embed(
            "Firebreathers application approved",
            "You are officially a Firebreather!",
        )
    } else {
        ui::error_embed(
            "Firebreathers application denied",
            "Unfortunately, your application was denied. You may reapply later.",
        )
    };
    let Ok(channel) = applicant.create_dm_channel(&ctx.http).await else {
        debug!(target: "commands.apply", user = applicant.get(), "could not open dm channel");
        return;
    };
    channel
        .id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
        .ok();
}

/// The applicant's id, recovered from the `<@id>` mention in the embed's
/// Applicant field.
fn applicant_from_embed(embed: &Embed) -> Option<UserId> {
    let field = embed.fields.iter().find(|field| field.name == "Applicant")?;
    let id: u64 = field
        .value
        .strip_prefix("<@")?
        .strip_suffix('>')?
        .parse()
        .ok()?;
    if id == 0 {
        None
    } else {
        Some(UserId::new(id))
    }
}
