//! The platform seam: everything the registration pass needs from the
//! Discord API, behind a trait so assembly can be driven against a mock.

use std::sync::Arc;

use serde::Serialize;
use serenity::async_trait;
use serenity::http::Http;
use serenity::model::application::{Command, CommandPermissionType, CommandType};
use serenity::model::id::{CommandId, GuildId, RoleId};

use super::descriptor::WireCommand;

/// Identity the platform echoes back for one registered descriptor.
#[derive(Clone, Debug)]
pub struct RegisteredCommand {
    pub id: CommandId,
    pub name: String,
    pub kind: CommandType,
}

impl From<&Command> for RegisteredCommand {
    fn from(command: &Command) -> Self {
        Self {
            id: command.id,
            name: command.name.clone(),
            kind: command.kind,
        }
    }
}

/// Role access to grant on one registered command.
#[derive(Clone, Debug)]
pub struct PermissionGrant {
    pub command: CommandId,
    pub name: String,
    pub roles: Vec<RoleId>,
}

#[async_trait]
pub trait CommandPlatform: Send + Sync {
    /// Replace the full command set with `commands`. Submitting an empty
    /// slice clears every previously registered command.
    async fn set_commands(&self, commands: &[WireCommand])
        -> serenity::Result<Vec<RegisteredCommand>>;

    /// Allow the grant's roles to invoke one registered command.
    async fn set_permissions(&self, grant: &PermissionGrant) -> serenity::Result<()>;
}

#[derive(Serialize)]
struct PermissionsBody {
    permissions: Vec<RolePermission>,
}

#[derive(Serialize)]
struct RolePermission {
    id: RoleId,
    #[serde(rename = "type")]
    kind: CommandPermissionType,
    permission: bool,
}

/// Live implementation targeting one guild's command endpoints.
pub struct GuildCommandPlatform {
    http: Arc<Http>,
    guild: GuildId,
}

impl GuildCommandPlatform {
    pub fn new(http: Arc<Http>, guild: GuildId) -> Self {
        Self { http, guild }
    }
}

#[async_trait]
impl CommandPlatform for GuildCommandPlatform {
    async fn set_commands(
        &self,
        commands: &[WireCommand],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        let registered = self.http.create_guild_commands(self.guild, &commands).await?;
        Ok(registered.iter().map(RegisteredCommand::from).collect())
    }

    async fn set_permissions(&self, grant: &PermissionGrant) -> serenity::Result<()> {
        let body = PermissionsBody {
            permissions: grant
                .roles
                .iter()
                .map(|&id| RolePermission {
                    id,
                    kind: CommandPermissionType::Role,
                    permission: true,
                })
                .collect(),
        };
        self.http
            .edit_guild_command_permissions(self.guild, grant.command, &body)
            .await?;
        Ok(())
    }
}
