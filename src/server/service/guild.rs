//! Guilds a logged in user may manage through the dashboard.

use serenity::all::Permissions;

use crate::server::{error::AppError, model::guild::PartialGuild, service::discord::DiscordApiService};

/// Service listing the user's guilds filtered by the configured permissions.
pub struct GuildService<'a> {
    discord: DiscordApiService<'a>,
    /// Permissions the user must hold in a guild for it to be listed.
    required: Permissions,
}

impl<'a> GuildService<'a> {
    /// Creates a new GuildService instance.
    ///
    /// # Arguments
    /// - `discord` - Discord API access for the current request
    /// - `required` - Permissions a listed guild must grant the user
    ///
    /// # Returns
    /// - `GuildService` - New service instance
    pub fn new(discord: DiscordApiService<'a>, required: Permissions) -> Self {
        Self { discord, required }
    }

    /// Fetches the user's guilds and keeps those they can manage.
    ///
    /// # Arguments
    /// - `access_token` - OAuth2 access token of the user
    ///
    /// # Returns
    /// - `Ok(Vec<PartialGuild>)` - Manageable guilds in Discord's order
    /// - `Err(AppError::DiscordErr)` - Discord rejected the request or rate limited it
    pub async fn list_manageable(&self, access_token: &str) -> Result<Vec<PartialGuild>, AppError> {
        let guilds = self.discord.fetch_user_guilds(access_token).await?;

        Ok(filter_manageable(guilds, self.required))
    }
}

/// Keeps guilds whose permission bitfield grants `required`.
///
/// Guilds with an unparseable bitfield are skipped.
pub fn filter_manageable(guilds: Vec<PartialGuild>, required: Permissions) -> Vec<PartialGuild> {
    guilds
        .into_iter()
        .filter(|guild| match guild.can_manage(required) {
            Ok(allowed) => allowed,
            Err(e) => {
                tracing::debug!("Skipping guild {}: {}", guild.id, e);
                false
            }
        })
        .collect()
}
