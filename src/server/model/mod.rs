//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! the dashboard's option tree, the logged in user and the Discord data fetched on
//! their behalf. Domain models are transformed to DTOs at the controller boundary.

pub mod guild;
pub mod options;
pub mod user;
