//! Context menu definitions. They live under their own root so they never
//! participate in the slash-command tree walk.

pub mod pin_message;
pub mod view_warnings;

use crate::registry::source::SourceUnit;

pub fn manifest() -> Vec<SourceUnit> {
    vec![view_warnings::entry(), pin_message::entry()]
}
