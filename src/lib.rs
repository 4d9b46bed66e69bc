// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod commands;
pub mod config;
pub mod contextmenus;
pub mod handler;
pub mod model;
pub mod registry;
pub mod ui;

pub use model::AppState;

use registry::source::SourceUnit;

/// Every definition unit the bot ships, commands and context menus alike.
/// The ready handler feeds this to a `ManifestSource` for registration.
pub fn manifest() -> Vec<SourceUnit> {
    let mut units = commands::manifest();
    units.extend(contextmenus::manifest());
    units
}
