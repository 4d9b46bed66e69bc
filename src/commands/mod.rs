//! Slash command definitions. The directory layout is structural: a file
//! directly under `commands/` registers as a flat command, one directory
//! level deep as a subcommand, two levels deep as a subcommand inside a
//! group. `manifest()` enumerates every definition unit together with the
//! `file!()` location that the walk classifies it by.

pub mod apply;
pub mod options;
pub mod ping;
pub mod serverinfo;
pub mod staff;
pub mod warn;

use crate::registry::source::SourceUnit;

pub fn manifest() -> Vec<SourceUnit> {
    vec![
        ping::entry(),
        serverinfo::entry(),
        apply::firebreathers::entry(),
        staff::ban::entry(),
        staff::purge::entry(),
        staff::slowmode::entry(),
        warn::issue::add::entry(),
        warn::issue::remove::entry(),
        warn::record::list::entry(),
    ]
}
