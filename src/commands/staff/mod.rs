//! Staff moderation subcommands, registered together under `/staff`.

pub mod ban;
pub mod purge;
pub mod slowmode;
