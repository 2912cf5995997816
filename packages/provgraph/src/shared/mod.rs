//! Shared module - Common types and utilities
//!
//! Arena-backed graph models used by every feature slice.

pub mod constants;
pub mod models;
pub mod utils;

pub use models::*;
