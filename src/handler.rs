use std::sync::Arc;

use serenity::async_trait;
use serenity::client::Context;
use serenity::model::application::{CommandType, Interaction};
use serenity::model::channel::Reaction;
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, RoleId};
use serenity::prelude::EventHandler;
use tracing::{debug, error, info, warn};

use crate::model::{AppState, ShardManagerContainer};
use crate::registry::platform::GuildCommandPlatform;
use crate::registry::routing::{invocation_path, qualified_identifier};
use crate::registry::run_registration_pass;
use crate::registry::source::ManifestSource;
use crate::registry::unit::listener_key;

pub struct Handler {
    pub guild_id: GuildId,
    pub admin_role: RoleId,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(target: "handler", user = %ready.user.name, "connected and ready");

        let source = ManifestSource::new(crate::manifest());
        let platform = GuildCommandPlatform::new(ctx.http.clone(), self.guild_id);

        match run_registration_pass(&source, &platform, self.admin_role).await {
            Ok(registry) => {
                let Some(app_state) = AppState::from_ctx(&ctx).await else {
                    error!(target: "handler", "app state missing from context; shutting down");
                    shutdown(&ctx).await;
                    return;
                };
                app_state.publish_registry(Arc::new(registry)).await;
            }
            Err(e) => {
                // A partially registered command set is worse than no bot
                // at all; stop the shards and let the supervisor restart us.
                error!(target: "handler", error = %e, "command registration failed; shutting down");
                shutdown(&ctx).await;
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            warn!(target: "handler", "app state missing from context");
            return;
        };
        let Some(registry) = app_state.registry().await else {
            debug!(target: "handler", "interaction arrived before registration finished");
            return;
        };

        match interaction {
            Interaction::Command(command) => {
                if command.data.kind == CommandType::ChatInput {
                    let identifier = qualified_identifier(
                        &command.data.name,
                        invocation_path(&command.data.options),
                    );
                    let Some(unit) = registry.command(&identifier) else {
                        warn!(target: "handler", identifier = %identifier, "no handler registered for command");
                        return;
                    };
                    (unit.handler)(&ctx, &command).await;
                } else {
                    let Some(menu) = registry.context_menu(&command.data.name) else {
                        warn!(target: "handler", name = %command.data.name, "no handler registered for context menu");
                        return;
                    };
                    (menu.handler)(&ctx, &command).await;
                }
            }
            Interaction::Component(component) => {
                let key = listener_key(&component.data.custom_id);
                let Some(listener) = registry.interaction_listener(key) else {
                    debug!(target: "handler", key, "no listener registered for component");
                    return;
                };
                (listener.handler)(&ctx, &component).await;
            }
            _ => {}
        }
    }

    async fn reaction_add(&self, ctx: Context, reaction: Reaction) {
        if reaction.guild_id != Some(self.guild_id) {
            return;
        }
        let Some(app_state) = AppState::from_ctx(&ctx).await else {
            return;
        };
        let Some(registry) = app_state.registry().await else {
            return;
        };
        for listener in registry.reaction_listeners() {
            (listener.handler)(&ctx, &reaction).await;
        }
    }
}

async fn shutdown(ctx: &Context) {
    let data = ctx.data.read().await;
    if let Some(manager) = data.get::<ShardManagerContainer>() {
        manager.shutdown_all().await;
    }
}
