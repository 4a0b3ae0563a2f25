//! Core types and logic for hackdeck.
//!
//! This crate provides everything the CLI needs short of terminal rendering:
//! - `Event` and related types as served by the events API
//! - `filter` for the visibility, search and sort pipeline
//! - `time`, `youtube`, `schedule` and `ics` for presentational derivations
//! - `session` for the demo login state
//! - `client` for fetching events with a staleness cache

pub mod client;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod params;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod time;
pub mod youtube;

// Re-export event types at crate root for convenience
pub use event::*;
