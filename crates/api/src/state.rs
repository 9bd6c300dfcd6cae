use std::sync::Arc;

use showroom_storage::ObjectStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: showroom_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage backend for media uploads and signed URLs.
    pub storage: Arc<dyn ObjectStorage>,
}
