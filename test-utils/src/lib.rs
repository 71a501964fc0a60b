//! Discord Dashboard Test Utils
//!
//! Provides shared testing utilities for the dashboard's unit and integration tests.
//!
//! # Overview
//!
//! The test utilities consist of these components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment with an in-memory SQLite database and a session
//! - **MemoryStore**: Shared in-memory JSON storage for option getters and setters
//! - **fixture**: Discord API payloads for deserialization tests
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_session_user() -> Result<(), TestError> {
//!     let mut test = TestBuilder::new().build().await?;
//!     let session = test.session().await?;
//!     // Store and read session data...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod fixture;
pub mod store;
