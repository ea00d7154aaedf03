//! Application state management.
//!
//! The state contains the configuration and, with PostgreSQL storage, the
//! connection pool. Both are cheap to clone.

use database::postgres::DatabaseConnection;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL connection pool; `None` with in-memory storage
    pub db: Option<DatabaseConnection>,
}
