//! Wire-format descriptors: the JSON bodies Discord's bulk-overwrite
//! endpoint accepts. One structural node maps to exactly one descriptor;
//! the shape follows the node's depth (flat command, subcommand list, or
//! subcommand-group list). Building is pure: nodes are never mutated, so
//! rebuilding a node always yields a structurally identical descriptor.

use serde::Serialize;
use serenity::builder::CreateCommandOption;
use serenity::model::application::{CommandOptionType, CommandType};

use super::unit::ContextMenuUnit;
use super::walker::{NodeLeaf, StructuralNode};

/// Top-level application-command descriptor. `type` and the option `type`s
/// serialize to Discord's numeric constants via serenity's model enums.
#[derive(Clone, Debug, Serialize)]
pub struct WireCommand {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<WireOption>,
    #[serde(rename = "type")]
    pub kind: CommandType,
    pub default_permission: bool,
}

impl WireCommand {
    fn chat_input(name: String, description: String, options: Vec<WireOption>) -> Self {
        Self {
            name,
            description,
            options,
            kind: CommandType::ChatInput,
            // Execution is opened up per-role by the authorize step, never
            // by default.
            default_permission: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum WireOption {
    /// An option carried verbatim from a unit's own schema.
    Plain(CreateCommandOption),
    /// One unit's schema retyped as a subcommand.
    SubCommand(WireSubCommand),
    /// One subcommand group and the subcommands inside it.
    Group(WireGroup),
}

#[derive(Clone, Debug, Serialize)]
pub struct WireSubCommand {
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CreateCommandOption>,
}

#[derive(Clone, Debug, Serialize)]
pub struct WireGroup {
    #[serde(rename = "type")]
    pub kind: CommandOptionType,
    pub name: String,
    pub description: String,
    pub options: Vec<WireSubCommand>,
}

fn subcommand_option(leaf: &NodeLeaf) -> WireSubCommand {
    WireSubCommand {
        kind: CommandOptionType::SubCommand,
        // The file-derived name is authoritative.
        name: leaf.name.clone(),
        description: leaf.unit.data.description.clone(),
        options: leaf.unit.data.options.clone(),
    }
}

/// Map one structural node to its wire descriptor plus the flat list of
/// units the descriptor covers; every returned unit later lands in the
/// command registry under its qualified identifier.
pub fn build_descriptor(node: &StructuralNode) -> (WireCommand, Vec<&NodeLeaf>) {
    match node.depth {
        1 => {
            let Some(leaf) = node.leaves.first() else {
                return (
                    WireCommand::chat_input(node.top_name.clone(), node.top_name.clone(), vec![]),
                    vec![],
                );
            };
            let options = leaf
                .unit
                .data
                .options
                .iter()
                .cloned()
                .map(WireOption::Plain)
                .collect();
            let wire = WireCommand::chat_input(
                leaf.name.clone(),
                leaf.unit.data.description.clone(),
                options,
            );
            (wire, vec![leaf])
        }
        2 => {
            let options = node
                .leaves
                .iter()
                .map(|leaf| WireOption::SubCommand(subcommand_option(leaf)))
                .collect();
            let wire = WireCommand::chat_input(
                node.top_name.clone(),
                node.top_name.clone(),
                options,
            );
            (wire, node.leaves.iter().collect())
        }
        _ => {
            // Group subcommands by their group name, preserving the order
            // each group was first seen in.
            let mut group_names: Vec<&str> = Vec::new();
            for leaf in &node.leaves {
                if !group_names.contains(&leaf.subcommand_name.as_str()) {
                    group_names.push(leaf.subcommand_name.as_str());
                }
            }

            let mut options = Vec::new();
            let mut units: Vec<&NodeLeaf> = Vec::new();
            for group in group_names {
                let members: Vec<&NodeLeaf> = node
                    .leaves
                    .iter()
                    .filter(|leaf| leaf.subcommand_name == group)
                    .collect();
                options.push(WireOption::Group(WireGroup {
                    kind: CommandOptionType::SubCommandGroup,
                    name: group.to_string(),
                    description: group.to_string(),
                    options: members.iter().map(|leaf| subcommand_option(leaf)).collect(),
                }));
                units.extend(members);
            }

            let wire = WireCommand::chat_input(
                node.top_name.clone(),
                node.top_name.clone(),
                options,
            );
            (wire, units)
        }
    }
}

/// Context menus register flat: a name, a menu type, and no options
/// (Discord requires an empty description for them).
pub fn context_menu_descriptor(menu: &ContextMenuUnit) -> WireCommand {
    WireCommand {
        name: menu.name.clone(),
        description: String::new(),
        options: vec![],
        kind: menu.kind,
        default_permission: false,
    }
}
