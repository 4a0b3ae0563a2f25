//! ICS file generation.
//!
//! Produces single-event iCalendar documents (RFC 5545) for "add to calendar"
//! exports.

mod generate;

pub use generate::{generate_ics, ics_filename};
