use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A guild the authenticated user is allowed to manage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GuildDto {
    /// Discord guild ID as a string.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub owner: bool,
    /// The user's permission bitfield in this guild, as a decimal string.
    pub permissions: String,
}
