//! Guilds returned by Discord's `/users/@me/guilds` endpoint.

use serde::Deserialize;
use serenity::all::{GuildId, Permissions};

use crate::{
    model::guild::GuildDto,
    server::{error::AppError, util::parse::parse_permissions},
};

/// Partial guild information returned from Discord API.
///
/// Discord sends the user's permission bitfield as a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PartialGuild {
    /// Discord guild ID.
    pub id: GuildId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    /// Raw permission bitfield of the user in this guild.
    pub permissions: String,
}

impl PartialGuild {
    /// Parses the user's permissions in this guild.
    ///
    /// # Returns
    /// - `Ok(Permissions)` - Parsed bitfield, unknown bits are dropped
    /// - `Err(AppError::InternalErr(ParsePermissions))` - Not a decimal number
    pub fn permissions(&self) -> Result<Permissions, AppError> {
        parse_permissions(&self.permissions)
    }

    /// Whether the user holds every permission in `required`.
    ///
    /// `ADMINISTRATOR` grants everything, matching Discord's own semantics.
    pub fn can_manage(&self, required: Permissions) -> Result<bool, AppError> {
        let permissions = self.permissions()?;

        Ok(permissions.contains(Permissions::ADMINISTRATOR) || permissions.contains(required))
    }

    pub fn into_dto(self) -> GuildDto {
        GuildDto {
            id: self.id.get().to_string(),
            name: self.name,
            icon: self.icon,
            owner: self.owner,
            permissions: self.permissions,
        }
    }
}
