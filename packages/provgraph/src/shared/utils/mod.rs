//! Utility helpers

pub mod time;

pub use time::{normalize_timestamp, parse_timestamp};
