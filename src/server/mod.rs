//! Server-side API backend and business logic.
//!
//! This module contains the complete backend of the dashboard: Discord login, guild
//! listing and the form options API. The backend uses Axum as the web framework,
//! tower-sessions for login sessions and Serenity's Discord models.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Option resolution, OAuth and Discord API calls
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Request/response processing and authentication guards
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (HTTP clients, option registry, cache)
//! - **Startup** (`startup`) - Initialization of logging, sessions and clients
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Dashboard** (`dashboard`) - Author-facing entry point starting the server
//! - **Theme** (`theme`) - Extension point for frontends
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** refreshes expiring Discord tokens
//! 3. **Controller** requires a logged in user, converts DTOs to params, calls service
//! 4. **Service** resolves options through the author's callbacks or calls Discord
//! 5. **Controller** converts domain views to DTOs, returns HTTP response

pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod theme;
pub mod util;
