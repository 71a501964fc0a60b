//! Form options: the settings a bot author exposes on the dashboard.
//!
//! Authors describe settings as `FormOption`s grouped into `FormGroup`s, each with
//! async callbacks for reading, writing and access control. The options service
//! resolves these into `GroupView`s for reads and an `UpdateReport` for writes.

pub mod access;
pub mod callback;
pub mod group;
pub mod option;
pub mod registry;
pub mod update;
pub mod view;

#[cfg(test)]
mod test;
