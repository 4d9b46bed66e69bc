//! Process configuration, read once at startup from the environment.

use std::env;

use serenity::model::id::{GuildId, RoleId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {0} must be a non-zero numeric id")]
    Invalid(&'static str),
}

/// Everything the bot needs from its environment.
#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub guild_id: GuildId,
    pub staff_role_id: RoleId,
}

impl BotConfig {
    /// Read configuration from `DISCORD_TOKEN`, `SERVER_ID`, and
    /// `STAFF_ROLE_ID`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = require("DISCORD_TOKEN")?;
        let guild_id = GuildId::new(require_id("SERVER_ID")?);
        let staff_role_id = RoleId::new(require_id("STAFF_ROLE_ID")?);
        Ok(Self {
            token,
            guild_id,
            staff_role_id,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn require_id(name: &'static str) -> Result<u64, ConfigError> {
    let value: u64 = require(name)?
        .parse()
        .map_err(|_| ConfigError::Invalid(name))?;
    // Snowflake ids are non-zero; the id types reject zero at
    // construction.
    if value == 0 {
        return Err(ConfigError::Invalid(name));
    }
    Ok(value)
}
