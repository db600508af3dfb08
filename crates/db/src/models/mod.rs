//! Entity models and their wire-level DTOs.
//!
//! Each module pairs the `FromRow` database struct with the request/response
//! shapes for its resource. Wire field names are camelCase per the REST
//! contract.

pub mod label;
pub mod status;
pub mod task;
pub mod user;
