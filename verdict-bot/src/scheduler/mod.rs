//! Scheduler layer for the bot
//!
//! This layer owns the poll loop: it fetches statuses on a fixed interval,
//! decides when to notify, and keeps the loop alive through every
//! recoverable failure.

pub mod error;
pub mod poller;
pub mod state;

pub use poller::StatusPoller;
