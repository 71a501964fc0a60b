//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the option tree or Discord. Services are responsible for:
//!
//! - **Option Resolution**: Applying access checks and calling author callbacks
//! - **Authentication**: Discord OAuth2 code exchange and token refresh
//! - **Discord Access**: Cached REST calls made with the user's token

pub mod auth;
pub mod discord;
pub mod guild;
pub mod options;
