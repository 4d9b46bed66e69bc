//! Warning management, split into issuing and record inspection.

pub mod issue;
pub mod record;
