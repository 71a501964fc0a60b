//! Session user and OAuth token models.
//!
//! Both are stored in the tower-sessions session after a successful Discord login
//! and read back by the auth guard and token refresh middleware.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serenity::all::{User as DiscordUser, UserId};

use crate::model::user::UserDto;

/// Access tokens expiring within this window are refreshed before handling a request.
pub const TOKEN_REFRESH_WINDOW_MINUTES: i64 = 5;

/// The authenticated Discord user as persisted in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Discord ID of the user
    pub id: u64,
    /// Discord username.
    pub name: String,
    /// Display name, if the user set one.
    pub global_name: Option<String>,
    /// Avatar hash for building CDN URLs.
    pub avatar: Option<String>,
}

impl SessionUser {
    /// Builds the session user from the `/users/@me` response.
    pub fn from_discord(user: DiscordUser) -> Self {
        Self {
            id: user.id.get(),
            name: user.name,
            global_name: user.global_name,
            avatar: user.avatar.map(|hash| hash.to_string()),
        }
    }

    /// The Discord snowflake handed to option callbacks.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id.to_string(),
            name: self.name,
            global_name: self.global_name,
            avatar: self.avatar,
        }
    }
}

/// Discord OAuth tokens of the logged in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl SessionTokens {
    /// Whether the access token expires within the refresh window of `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - now <= Duration::minutes(TOKEN_REFRESH_WINDOW_MINUTES)
    }
}
