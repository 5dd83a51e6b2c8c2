//! Verdict Core
//!
//! Core types and checks for the Verdict status watcher.
//!
//! This crate contains:
//! - Domain types: status codes, the verdict table, poll results
//! - Validation: shape checks on raw API responses and status extraction

pub mod domain;
pub mod error;
pub mod validation;

pub use domain::poll::{PollResult, WorkItemStatus};
pub use domain::status::{StatusCode, VerdictTable};
pub use error::ValidationError;
pub use validation::{extract, validate};
