//! Definition units: the self-contained command / context-menu descriptors
//! that the tree walker discovers and the registries index. A unit carries
//! its schema (opaque to the assembly pipeline), a handler, and any
//! interaction/reaction listeners it wants merged into the global tables.

use futures::future::BoxFuture;
use serenity::builder::CreateCommandOption;
use serenity::model::application::{CommandInteraction, CommandType, ComponentInteraction};
use serenity::model::channel::Reaction;
use serenity::prelude::Context;

/// Handler invoked when a slash command resolves to this unit.
pub type SlashHandler = for<'a> fn(&'a Context, &'a CommandInteraction) -> BoxFuture<'a, ()>;

/// Handler invoked when a component's `custom_id` carries this listener's key.
pub type ComponentHandler = for<'a> fn(&'a Context, &'a ComponentInteraction) -> BoxFuture<'a, ()>;

/// Handler invoked for every reaction added while this listener is registered.
pub type ReactionHandler = for<'a> fn(&'a Context, &'a Reaction) -> BoxFuture<'a, ()>;

/// Context menus arrive as `CommandInteraction`s, same as slash commands.
pub type MenuHandler = SlashHandler;

/// The schema half of a slash command definition. `options` is forwarded
/// verbatim into the wire descriptor; the assembly pipeline never inspects
/// it. The command's wire name always comes from its source path, so units
/// do not declare one.
#[derive(Clone, Debug, Default)]
pub struct CommandData {
    pub description: String,
    pub options: Vec<CreateCommandOption>,
}

impl CommandData {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: CreateCommandOption) -> Self {
        self.options.push(option);
        self
    }
}

/// One slash command definition. Immutable after construction: the
/// qualified identifier derived during the walk is carried alongside the
/// unit (`NodeLeaf`), never written back onto it.
pub struct CommandUnit {
    pub data: CommandData,
    pub handler: SlashHandler,
    pub interaction_listeners: Vec<InteractionListener>,
    pub reaction_listeners: Vec<ReactionListener>,
}

impl CommandUnit {
    pub fn new(data: CommandData, handler: SlashHandler) -> Self {
        Self {
            data,
            handler,
            interaction_listeners: Vec::new(),
            reaction_listeners: Vec::new(),
        }
    }

    pub fn interaction_listener(mut self, key: &'static str, handler: ComponentHandler) -> Self {
        self.interaction_listeners
            .push(InteractionListener { key, handler });
        self
    }

    pub fn reaction_listener(mut self, key: &'static str, handler: ReactionHandler) -> Self {
        self.reaction_listeners.push(ReactionListener { key, handler });
        self
    }
}

/// One context-menu definition. The display name doubles as the registry
/// key, so it must be unique across menus.
pub struct ContextMenuUnit {
    pub name: String,
    pub kind: CommandType,
    pub handler: MenuHandler,
}

impl ContextMenuUnit {
    pub fn user(name: impl Into<String>, handler: MenuHandler) -> Self {
        Self {
            name: name.into(),
            kind: CommandType::User,
            handler,
        }
    }

    pub fn message(name: impl Into<String>, handler: MenuHandler) -> Self {
        Self {
            name: name.into(),
            kind: CommandType::Message,
            handler,
        }
    }
}

#[derive(Clone, Copy)]
pub struct InteractionListener {
    pub key: &'static str,
    pub handler: ComponentHandler,
}

#[derive(Clone, Copy)]
pub struct ReactionListener {
    pub key: &'static str,
    pub handler: ReactionHandler,
}

/// Separator between a component's listener key and its encoded arguments.
pub const CUSTOM_ID_SEPARATOR: char = ':';

/// Build a component `custom_id` from a listener key and its arguments.
/// Discord caps custom ids at 100 characters; callers keep arguments short
/// (snowflakes and small flags).
pub fn encode_custom_id(key: &str, args: &[&str]) -> String {
    let mut id = String::from(key);
    for arg in args {
        id.push(CUSTOM_ID_SEPARATOR);
        id.push_str(arg);
    }
    id
}

/// The listener key a `custom_id` routes to (everything before the first
/// separator; the whole id when no arguments were encoded).
pub fn listener_key(custom_id: &str) -> &str {
    custom_id
        .split(CUSTOM_ID_SEPARATOR)
        .next()
        .unwrap_or(custom_id)
}

/// The encoded arguments of a `custom_id`, in order.
pub fn custom_id_args(custom_id: &str) -> Vec<&str> {
    custom_id.split(CUSTOM_ID_SEPARATOR).skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_id_round_trip() {
        let id = encode_custom_id("banDecide", &["123", "purge"]);
        assert_eq!(id, "banDecide:123:purge");
        assert_eq!(listener_key(&id), "banDecide");
        assert_eq!(custom_id_args(&id), vec!["123", "purge"]);
    }

    #[test]
    fn bare_key_has_no_args() {
        assert_eq!(listener_key("fbQuickApprove"), "fbQuickApprove");
        assert!(custom_id_args("fbQuickApprove").is_empty());
    }
}
