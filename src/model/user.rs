use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The authenticated Discord user as exposed by `/api/auth/user`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct UserDto {
    /// Discord user ID, serialized as a string to survive JavaScript number precision.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
