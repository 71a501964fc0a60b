//! Request guards and session handling shared by the controllers.
//!
//! - `auth` - `AuthGuard` requiring a logged in user
//! - `refresh` - Refreshes Discord tokens that are about to expire
//! - `session` - Typed access to session data

pub mod auth;
pub mod refresh;
pub mod session;

#[cfg(test)]
mod test;
