//! The discovery boundary. The walker only ever sees a `CommandSource`:
//! a tree of directories and loadable definition units in which the layout
//! encodes command structure (file/folder name = command/subcommand/group
//! name). Unreadable paths degrade to empty listings and unrecognized
//! units load as `None`; discovery never fails the pass.
//!
//! Production uses `ManifestSource`: every definition module is enumerated
//! explicitly (`commands::manifest()`, `contextmenus::manifest()`) and
//! declares its own location with `file!()`, so the `src/commands/` layout
//! on disk remains the single structural authority without any runtime
//! code loading.

use std::sync::Arc;

use serenity::async_trait;

use super::unit::{CommandUnit, ContextMenuUnit};

/// Closed set of definition kinds a source can yield. Listener kinds are
/// not loose units; they ride along on their owning command.
#[derive(Clone)]
pub enum UnitKind {
    Command(Arc<CommandUnit>),
    ContextMenu(Arc<ContextMenuUnit>),
}

/// One enumerated definition module: where it sits, and what it is.
#[derive(Clone)]
pub struct SourceUnit {
    pub path: String,
    pub kind: UnitKind,
}

impl SourceUnit {
    /// Declare a slash command at `location` (pass `file!()`).
    pub fn command(location: &str, unit: CommandUnit) -> Self {
        Self {
            path: normalize_source_path(location),
            kind: UnitKind::Command(Arc::new(unit)),
        }
    }

    /// Declare a context menu at `location` (pass `file!()`).
    pub fn context_menu(location: &str, unit: ContextMenuUnit) -> Self {
        Self {
            path: normalize_source_path(location),
            kind: UnitKind::ContextMenu(Arc::new(unit)),
        }
    }
}

/// A directory listing entry below some source root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    pub path: String,
    pub is_dir: bool,
}

#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Immediate children of `path`, in stable order. Unknown or unreadable
    /// paths yield an empty listing rather than an error.
    async fn read_dir(&self, path: &str) -> Vec<SourceEntry>;

    /// Load the definition unit at `path`. `None` when nothing recognizable
    /// lives there.
    async fn load(&self, path: &str) -> Option<UnitKind>;
}

/// Strip a `file!()` location down to its registry path: separators are
/// unified and everything up to and including the crate's `src/` prefix is
/// dropped, leaving e.g. `commands/staff/ban.rs`.
pub fn normalize_source_path(location: &str) -> String {
    let unified = location.replace('\\', "/");
    match unified.find("src/") {
        Some(idx) => unified[idx + 4..].to_string(),
        None => unified,
    }
}

/// In-memory source tree over an enumerated set of definition modules.
/// Listing order follows enumeration order, which keeps walks (and the
/// descriptor batch built from them) deterministic.
pub struct ManifestSource {
    entries: Vec<SourceUnit>,
}

impl ManifestSource {
    pub fn new(entries: Vec<SourceUnit>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl CommandSource for ManifestSource {
    async fn read_dir(&self, path: &str) -> Vec<SourceEntry> {
        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };
        let mut children: Vec<SourceEntry> = Vec::new();
        for entry in &self.entries {
            let Some(rest) = entry.path.strip_prefix(&prefix) else {
                continue;
            };
            if rest.is_empty() {
                continue;
            }
            let child = match rest.split_once('/') {
                // Deeper levels remain: the next segment is a directory.
                Some((segment, _)) => SourceEntry {
                    path: format!("{prefix}{segment}"),
                    is_dir: true,
                },
                None => SourceEntry {
                    path: entry.path.clone(),
                    is_dir: false,
                },
            };
            if !children.contains(&child) {
                children.push(child);
            }
        }
        children
    }

    async fn load(&self, path: &str) -> Option<UnitKind> {
        self.entries
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.kind.clone())
    }
}
