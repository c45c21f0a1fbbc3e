//! Core domain types
//!
//! These types describe what a job resolution works with: the nested
//! configuration documents, the taxonomy of pipeline platforms and the
//! outcome of a resolution.

pub mod job;
pub mod taxonomy;
