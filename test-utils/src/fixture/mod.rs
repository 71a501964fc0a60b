//! Test fixtures providing Discord API payloads.
//!
//! Fixtures build the JSON bodies Discord returns so that deserialization and
//! filtering can be tested without a network connection.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let user = fixture::discord::user();
//!
//! let guild = fixture::discord::guild_builder()
//!     .id("42")
//!     .permissions("8")
//!     .build();
//! ```

pub mod discord;
