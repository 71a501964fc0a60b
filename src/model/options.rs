use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Marker attached to a group or option the user can see but not edit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DisabledDto {
    /// Always `true` when present; kept for wire compatibility with existing themes.
    #[serde(rename = "bool")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OptionResponseDto {
    pub id: String,
    /// Rendering discriminator such as `TextInput`.
    #[serde(rename = "type")]
    pub option_type: String,
    #[schema(value_type = Object)]
    pub meta: Map<String, Value>,
    #[schema(value_type = Object)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<DisabledDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GroupResponseDto {
    pub id: String,
    #[schema(value_type = Object)]
    pub meta: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<DisabledDto>,
    pub options: Vec<OptionResponseDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OptionUpdateDto {
    pub id: String,
    #[schema(value_type = Object)]
    pub value: Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GroupUpdateDto {
    pub id: String,
    #[serde(default)]
    pub options: Vec<OptionUpdateDto>,
}

/// A single failed update. `id` is absent for failures affecting the whole group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct OptionErrorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: String,
}

/// Failed updates keyed by group ID. An empty map means every update succeeded.
pub type UpdateErrorsDto = HashMap<String, Vec<OptionErrorDto>>;
