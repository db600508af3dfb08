//! HTTP handlers, one module per resource.

pub mod auth;
pub mod labels;
pub mod statuses;
pub mod tasks;
pub mod users;
