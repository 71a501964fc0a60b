//! HTTP request handlers.
//!
//! Controllers authenticate the request, convert DTOs into domain params, call the
//! service layer and convert the results back into DTOs. Every handler is annotated
//! for the generated OpenAPI document.

pub mod auth;
pub mod guild;
pub mod options;

#[cfg(test)]
mod test;
