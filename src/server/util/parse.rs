//! Parsing of Discord values that arrive as strings.

use serenity::all::{GuildId, Permissions};

use crate::server::error::{internal::InternalError, AppError};

/// Parses a guild snowflake taken from a request path.
///
/// # Arguments
/// - `value` - Decimal guild ID as sent by the client
///
/// # Returns
/// - `Ok(GuildId)` - Non-zero decimal ID
/// - `Err(AppError::BadRequest)` - Not a number, or zero
pub fn parse_guild_id(value: &str) -> Result<GuildId, AppError> {
    match value.parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId::new(id)),
        _ => Err(AppError::BadRequest(format!("Invalid guild ID '{}'", value))),
    }
}

/// Parses the permission bitfield Discord sends for a user's guild.
///
/// Bits unknown to serenity are dropped.
///
/// # Returns
/// - `Ok(Permissions)` - Parsed bitfield
/// - `Err(AppError::InternalErr(ParsePermissions))` - Discord sent a non-decimal value
pub fn parse_permissions(value: &str) -> Result<Permissions, AppError> {
    let bits = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParsePermissions {
            value: value.to_string(),
            source: e,
        })?;

    Ok(Permissions::from_bits_truncate(bits))
}
