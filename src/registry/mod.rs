//! Command registration: walks the declared command tree, merges it into
//! wire descriptors, replaces the guild's command set in one shot, and
//! indexes every handler for dispatch.

pub mod assembler;
pub mod descriptor;
pub mod error;
pub mod platform;
pub mod routing;
pub mod source;
pub mod unit;
pub mod walker;

pub use assembler::{run_registration_pass, CommandRegistry};
pub use error::AssemblyError;

/// Root the slash-command tree is declared under.
pub const COMMANDS_ROOT: &str = "commands";

/// Root context menu units are declared under.
pub const CONTEXT_MENUS_ROOT: &str = "contextmenus";
