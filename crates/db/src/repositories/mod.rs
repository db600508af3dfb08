//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods. The
//! first argument is a `PgExecutor` so the same method works against the
//! shared pool or inside an open transaction -- write flows (fetch, resolve
//! references, merge, persist) run in a single transaction.

pub mod label_repo;
pub mod status_repo;
pub mod task_repo;
pub mod user_repo;

pub use label_repo::LabelRepo;
pub use status_repo::StatusRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
