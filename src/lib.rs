//! A pluggable web dashboard for Discord bots.
//!
//! Bot authors declare configurable settings as option groups, each option backed by
//! their own async getter and setter. The dashboard logs users in with Discord OAuth2,
//! lists the guilds they can manage and serves the options as a JSON API, applying
//! every group's and option's access check on reads and writes.
//!
//! ```rust,ignore
//! use discord_dashboard::{Config, Dashboard, FormGroupBuilder, FormOptionBuilder, OptionSetResult};
//!
//! let prefix = FormOptionBuilder::text_input()
//!     .id("prefix")
//!     .meta(serde_json::json!({ "label": "Command prefix" }))
//!     .on_request(|ctx| async move { Ok(load_prefix(ctx.guild_id).await?) })
//!     .on_update(|ctx, value| async move { save_prefix(ctx.guild_id, value).await })
//!     .build()?;
//!
//! Dashboard::new(Config::from_env()?)
//!     .set_guild_options(vec![FormGroupBuilder::new().id("general").option(prefix).build()?])
//!     .start()
//!     .await?;
//! ```

pub mod model;
pub mod server;

pub use server::{
    config::Config,
    dashboard::Dashboard,
    error::{build::BuildError, AppError},
    model::options::{
        access::{AccessControlResult, OptionSetResult},
        callback::{CallbackError, CallbackResult, OptionContext},
        group::{FormGroup, FormGroupBuilder},
        option::{FormOption, FormOptionBuilder, TEXT_INPUT},
        registry::OptionRegistry,
    },
    theme::Theme,
};
