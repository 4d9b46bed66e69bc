//! Drives one registration pass: discover units, build descriptors,
//! replace the platform's command set, index the handlers, then grant the
//! admin role access to everything that registered. Any failure aborts
//! the pass; callers only ever see a fully published registry or an error.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serenity::model::id::RoleId;
use tracing::{debug, info, warn};

use super::descriptor::{build_descriptor, context_menu_descriptor};
use super::error::AssemblyError;
use super::platform::{CommandPlatform, PermissionGrant};
use super::source::{CommandSource, UnitKind};
use super::unit::{CommandUnit, ContextMenuUnit, InteractionListener, ReactionListener};
use super::walker::{parse_command_tree, NodeLeaf};
use super::{COMMANDS_ROOT, CONTEXT_MENUS_ROOT};

/// Immutable lookup tables produced by one registration pass. Slash
/// commands are keyed by qualified identifier, context menus by their
/// display name, listeners by the key their unit declared.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<CommandUnit>>,
    context_menus: HashMap<String, Arc<ContextMenuUnit>>,
    interaction_listeners: HashMap<String, InteractionListener>,
    reaction_listeners: HashMap<String, ReactionListener>,
}

impl CommandRegistry {
    fn index(leaves: &[&NodeLeaf], menus: &[Arc<ContextMenuUnit>]) -> Self {
        let mut registry = Self::default();

        for leaf in leaves {
            if registry
                .commands
                .insert(leaf.identifier.clone(), Arc::clone(&leaf.unit))
                .is_some()
            {
                warn!(
                    target: "registry.assembler",
                    identifier = %leaf.identifier,
                    "duplicate command identifier, keeping the later unit"
                );
            }
            for listener in &leaf.unit.interaction_listeners {
                if registry
                    .interaction_listeners
                    .insert(listener.key.to_string(), *listener)
                    .is_some()
                {
                    warn!(
                        target: "registry.assembler",
                        key = listener.key,
                        "duplicate interaction listener key, keeping the later handler"
                    );
                }
            }
            for listener in &leaf.unit.reaction_listeners {
                if registry
                    .reaction_listeners
                    .insert(listener.key.to_string(), *listener)
                    .is_some()
                {
                    warn!(
                        target: "registry.assembler",
                        key = listener.key,
                        "duplicate reaction listener key, keeping the later handler"
                    );
                }
            }
        }

        for menu in menus {
            if registry
                .context_menus
                .insert(menu.name.clone(), Arc::clone(menu))
                .is_some()
            {
                warn!(
                    target: "registry.assembler",
                    name = %menu.name,
                    "duplicate context menu name, keeping the later unit"
                );
            }
        }

        registry
    }

    pub fn command(&self, identifier: &str) -> Option<Arc<CommandUnit>> {
        self.commands.get(identifier).cloned()
    }

    pub fn context_menu(&self, name: &str) -> Option<Arc<ContextMenuUnit>> {
        self.context_menus.get(name).cloned()
    }

    pub fn interaction_listener(&self, key: &str) -> Option<InteractionListener> {
        self.interaction_listeners.get(key).copied()
    }

    pub fn reaction_listeners(&self) -> impl Iterator<Item = &ReactionListener> {
        self.reaction_listeners.values()
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn context_menu_count(&self) -> usize {
        self.context_menus.len()
    }
}

/// Build and publish the full command set from `source`, granting
/// `admin_role` access to every registered descriptor.
pub async fn run_registration_pass(
    source: &dyn CommandSource,
    platform: &dyn CommandPlatform,
    admin_role: RoleId,
) -> Result<CommandRegistry, AssemblyError> {
    let (nodes, menus) = tokio::join!(
        parse_command_tree(source, COMMANDS_ROOT),
        discover_context_menus(source, CONTEXT_MENUS_ROOT),
    );

    let mut wire = Vec::with_capacity(nodes.len() + menus.len());
    let mut leaves: Vec<&NodeLeaf> = Vec::new();
    for node in &nodes {
        let (descriptor, units) = build_descriptor(node);
        wire.push(descriptor);
        leaves.extend(units);
    }
    for menu in &menus {
        wire.push(context_menu_descriptor(menu));
    }

    debug!(
        target: "registry.assembler",
        commands = nodes.len(),
        context_menus = menus.len(),
        "submitting command set"
    );

    platform
        .set_commands(&[])
        .await
        .map_err(AssemblyError::ClearCommands)?;
    let registered = platform
        .set_commands(&wire)
        .await
        .map_err(|source| AssemblyError::SetCommands { count: wire.len(), source })?;

    let registry = CommandRegistry::index(&leaves, &menus);

    for command in &registered {
        let grant = PermissionGrant {
            command: command.id,
            name: command.name.clone(),
            roles: vec![admin_role],
        };
        platform
            .set_permissions(&grant)
            .await
            .map_err(|source| AssemblyError::SetPermissions {
                command: command.name.clone(),
                source,
            })?;
    }

    info!(
        target: "registry.assembler",
        registered = registered.len(),
        handlers = registry.command_count(),
        "command registration pass complete"
    );

    Ok(registry)
}

async fn discover_context_menus(
    source: &dyn CommandSource,
    root: &str,
) -> Vec<Arc<ContextMenuUnit>> {
    let entries = source.read_dir(root).await;
    let loads = join_all(
        entries
            .iter()
            .filter(|entry| !entry.is_dir)
            .map(|entry| async move { (entry.path.clone(), source.load(&entry.path).await) }),
    )
    .await;

    let mut menus = Vec::new();
    for (path, kind) in loads {
        match kind {
            Some(UnitKind::ContextMenu(menu)) => menus.push(menu),
            Some(UnitKind::Command(_)) | None => {
                debug!(target: "registry.assembler", path = %path, "skipping non-menu entry");
            }
        }
    }
    menus
}
