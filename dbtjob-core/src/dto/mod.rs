//! Data Transfer Objects for the remote collaborators
//!
//! Wire shapes exchanged with the document store and the secret store.
//! Field names follow the remote APIs (camelCase), not Rust conventions.

pub mod document;
pub mod secret;
