//! Domain-level building blocks shared by the db and api crates.
//!
//! Contains the error taxonomy, common type aliases, and the [`Patch`]
//! wrapper used for partial-update payloads.

pub mod error;
pub mod patch;
pub mod types;
