//! dbtjob Core
//!
//! Core types and pure logic for resolving pipeline jobs into dbt invocations.
//!
//! This crate contains:
//! - Domain types: job configs, taxonomy tags, resolved jobs
//! - DTOs: request/response shapes of the remote collaborators
//! - Config merging and invocation formatting (no I/O)

pub mod domain;
pub mod dto;
pub mod invocation;
pub mod merge;

pub use invocation::{format_invocation, pool_name};
pub use merge::deep_merge;
