use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable: the pool is internally reference-counted and the config
/// sits behind an `Arc`. There is no other shared mutable state -- handlers
/// are stateless per request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: taskhub_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS).
    pub config: Arc<ServerConfig>,
}
