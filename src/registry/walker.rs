//! The tree walk. Three usable command shapes exist:
//!
//! 1. command
//! 2. command > subcommand
//! 3. command > subcommand group > subcommand
//!
//! so the maximum nesting depth is 3. The walker advances one depth level
//! per iteration, fanning out over the whole frontier concurrently, and
//! classifies every definition unit purely from where its file sits:
//! the deepest shared path segment names the top-level command.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use super::source::{CommandSource, SourceEntry, UnitKind};
use super::unit::CommandUnit;

/// Depth budget for the walk; level `n + 1` never starts before every
/// result at level `n` is in, because classification depends on how many
/// segments have been consumed.
pub const MAX_COMMAND_DEPTH: usize = 3;

/// Joins the non-empty of `[name, parent, grandparent]` into a qualified
/// identifier such as `add:issue:warn`.
pub const IDENTIFIER_SEPARATOR: &str = ":";

/// All definition units sharing one top-level command name, at the depth
/// the name was first observed.
pub struct StructuralNode {
    pub top_name: String,
    pub depth: usize,
    pub leaves: Vec<NodeLeaf>,
}

/// One classified unit inside a node. The qualified identifier is derived
/// here, during classification, and carried alongside the unit; units
/// themselves stay immutable.
#[derive(Clone)]
pub struct NodeLeaf {
    pub name: String,
    pub subcommand_name: String,
    pub identifier: String,
    pub unit: Arc<CommandUnit>,
}

enum WalkStep {
    Descend(Vec<SourceEntry>),
    Leaf(Option<(String, NodeLeaf)>),
}

/// Walk `root` and group every reachable command unit into structural
/// nodes. Missing or unreadable roots produce an empty result, and entries
/// that do not load as command units are skipped; the walk itself cannot
/// fail.
pub async fn parse_command_tree(source: &dyn CommandSource, root: &str) -> Vec<StructuralNode> {
    let mut nodes: Vec<StructuralNode> = Vec::new();
    let mut frontier = source.read_dir(root).await;
    let mut depth = 0;

    while !frontier.is_empty() && depth < MAX_COMMAND_DEPTH {
        depth += 1;
        let steps = join_all(
            frontier
                .iter()
                .map(|entry| walk_entry(source, entry, depth)),
        )
        .await;

        frontier = Vec::new();
        for step in steps {
            match step {
                WalkStep::Descend(children) => frontier.extend(children),
                WalkStep::Leaf(Some((top_name, leaf))) => {
                    place_leaf(&mut nodes, top_name, leaf, depth);
                }
                WalkStep::Leaf(None) => {}
            }
        }
    }

    nodes
}

async fn walk_entry(source: &dyn CommandSource, entry: &SourceEntry, depth: usize) -> WalkStep {
    if entry.is_dir {
        return WalkStep::Descend(source.read_dir(&entry.path).await);
    }
    match source.load(&entry.path).await {
        Some(UnitKind::Command(unit)) => {
            WalkStep::Leaf(Some(classify_leaf(&entry.path, depth, unit)))
        }
        Some(_) => {
            debug!(target: "registry.walker", path = %entry.path, "non-command unit in command tree; skipping");
            WalkStep::Leaf(None)
        }
        None => {
            debug!(target: "registry.walker", path = %entry.path, "entry did not load as a definition unit; skipping");
            WalkStep::Leaf(None)
        }
    }
}

/// Split the path into segments, reverse them, and keep the `depth` that
/// the walk has consumed (extension stripped, whitespace trimmed). The
/// file's own segment is the leaf name, the next one up the parent, the
/// one above that the grandparent.
fn classify_leaf(path: &str, depth: usize, unit: Arc<CommandUnit>) -> (String, NodeLeaf) {
    let segments: Vec<String> = path
        .rsplit('/')
        .take(depth)
        .map(|segment| {
            segment
                .split('.')
                .next()
                .unwrap_or(segment)
                .trim()
                .to_string()
        })
        .collect();

    let name = segments.first().cloned().unwrap_or_default();
    let parent = segments.get(1);
    let grandparent = segments.get(2);

    let top_name = grandparent
        .or(parent)
        .cloned()
        .unwrap_or_else(|| name.clone());
    let subcommand_name = match grandparent {
        Some(_) => parent.cloned().unwrap_or_default(),
        None => String::new(),
    };
    let identifier = std::iter::once(name.as_str())
        .chain(parent.map(String::as_str))
        .chain(grandparent.map(String::as_str))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(IDENTIFIER_SEPARATOR);

    (
        top_name,
        NodeLeaf {
            name,
            subcommand_name,
            identifier,
            unit,
        },
    )
}

/// Append a classified leaf to its node, creating the node on first sight.
/// A top name observed again at a different depth keeps the first-seen
/// depth; the late leaf still joins the node but its grouping cannot be
/// represented there, so the demotion is logged.
fn place_leaf(nodes: &mut Vec<StructuralNode>, top_name: String, leaf: NodeLeaf, depth: usize) {
    match nodes.iter_mut().find(|node| node.top_name == top_name) {
        Some(node) => {
            if node.depth != depth {
                warn!(
                    target: "registry.walker",
                    top = %node.top_name,
                    first_seen = node.depth,
                    observed = depth,
                    identifier = %leaf.identifier,
                    "top-level name observed at inconsistent depths; keeping first-seen depth"
                );
            }
            node.leaves.push(leaf);
        }
        None => nodes.push(StructuralNode {
            top_name,
            depth,
            leaves: vec![leaf],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::unit::{CommandData, CommandUnit};

    fn dummy_unit() -> Arc<CommandUnit> {
        Arc::new(CommandUnit::new(CommandData::new("test"), |_, _| {
            Box::pin(async {})
        }))
    }

    #[test]
    fn classifies_full_depth_path() {
        let (top, leaf) = classify_leaf("commands/warn/issue/add.rs", 3, dummy_unit());
        assert_eq!(top, "warn");
        assert_eq!(leaf.name, "add");
        assert_eq!(leaf.subcommand_name, "issue");
        assert_eq!(leaf.identifier, "add:issue:warn");
    }

    #[test]
    fn classifies_flat_path_without_parents() {
        let (top, leaf) = classify_leaf("commands/ping.rs", 1, dummy_unit());
        assert_eq!(top, "ping");
        assert_eq!(leaf.name, "ping");
        assert_eq!(leaf.subcommand_name, "");
        assert_eq!(leaf.identifier, "ping");
    }

    #[test]
    fn strips_extension_and_whitespace() {
        let (_, leaf) = classify_leaf("commands/staff/ban .rs", 2, dummy_unit());
        assert_eq!(leaf.name, "ban");
        assert_eq!(leaf.identifier, "ban:staff");
    }
}
