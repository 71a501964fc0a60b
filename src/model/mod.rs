//! Wire models shared by the HTTP API and any theme rendering it.
//!
//! These DTOs are the JSON shapes exchanged with the browser. Server-side domain
//! types live under `server::model` and convert into these at the controller
//! boundary.

pub mod api;
pub mod guild;
pub mod options;
pub mod user;
