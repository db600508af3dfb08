//! Common type aliases used across the workspace.

/// Database primary-key type matching BIGSERIAL/BIGINT columns.
pub type DbId = i64;

/// UTC timestamp type matching TIMESTAMPTZ columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
