//! Core domain types
//!
//! These types are shared between the HTTP client (which only moves raw
//! payloads around) and the bot (which decides what to tell the user).

pub mod poll;
pub mod status;
