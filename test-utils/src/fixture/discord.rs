//! Fixture for Discord `/users/@me` and `/users/@me/guilds` payloads.

use serde_json::{json, Value};

/// Default test user Discord ID.
pub const DEFAULT_USER_ID: &str = "123456789";

/// Default test user name.
pub const DEFAULT_USER_NAME: &str = "tester";

/// Default test guild Discord ID.
pub const DEFAULT_GUILD_ID: &str = "987654321";

/// Default test guild name.
pub const DEFAULT_GUILD_NAME: &str = "Test Guild";

/// Default permission bitfield, `MANAGE_GUILD` (32).
pub const DEFAULT_PERMISSIONS: &str = "32";

/// Creates a `/users/@me` response body with default values.
///
/// # Returns
/// - `Value` - JSON user object with id, username, discriminator and avatar
///
/// # Example
/// ```rust,ignore
/// let user: User = serde_json::from_value(fixture::discord::user())?;
/// ```
pub fn user() -> Value {
    user_with_id(DEFAULT_USER_ID)
}

/// Creates a `/users/@me` response body for a specific user ID.
///
/// # Arguments
/// - `id` - Discord user ID as a decimal string
///
/// # Returns
/// - `Value` - JSON user object
pub fn user_with_id(id: &str) -> Value {
    json!({
        "id": id,
        "username": DEFAULT_USER_NAME,
        "global_name": "Tester",
        "discriminator": "0",
        "avatar": null,
        "bot": false,
        "email": "tester@example.com",
        "verified": true
    })
}

/// Creates a partial guild object with default values.
///
/// # Returns
/// - `Value` - JSON guild as found in the `/users/@me/guilds` array
pub fn guild() -> Value {
    guild_builder().build()
}

/// Creates a customizable partial guild builder.
///
/// # Returns
/// - `GuildBuilder` - Builder with default values
///
/// # Example
/// ```rust,ignore
/// let guild = fixture::discord::guild_builder()
///     .id("111")
///     .permissions("0")
///     .build();
/// ```
pub fn guild_builder() -> GuildBuilder {
    GuildBuilder::default()
}

/// Creates a `/users/@me/guilds` response body from individual guilds.
///
/// # Arguments
/// - `guilds` - Guild objects, usually from `guild_builder()`
///
/// # Returns
/// - `Value` - JSON array
pub fn guilds(guilds: impl IntoIterator<Item = Value>) -> Value {
    Value::Array(guilds.into_iter().collect())
}

/// Builder for partial guild payloads.
pub struct GuildBuilder {
    id: String,
    name: String,
    icon: Option<String>,
    owner: bool,
    permissions: String,
}

impl Default for GuildBuilder {
    fn default() -> Self {
        Self {
            id: DEFAULT_GUILD_ID.to_string(),
            name: DEFAULT_GUILD_NAME.to_string(),
            icon: None,
            owner: false,
            permissions: DEFAULT_PERMISSIONS.to_string(),
        }
    }
}

impl GuildBuilder {
    /// Sets the guild ID.
    ///
    /// # Arguments
    /// - `id` - Discord guild ID as a decimal string
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn owner(mut self, owner: bool) -> Self {
        self.owner = owner;
        self
    }

    /// Sets the user's permission bitfield in the guild.
    ///
    /// Discord sends this as a decimal string; non-numeric values can be used to test
    /// parse failures.
    ///
    /// # Arguments
    /// - `permissions` - Decimal permission bitfield
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Builds the guild payload.
    ///
    /// # Returns
    /// - `Value` - JSON guild object with configured values
    pub fn build(self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "icon": self.icon,
            "owner": self.owner,
            "permissions": self.permissions,
            "features": []
        })
    }
}
