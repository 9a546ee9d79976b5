//! Error types for the data layer.
//!
//! [`DbError`] wraps the underlying [`sqlx`] errors. When a failure crosses
//! into the proximity core it is converted into a
//! [`StoreError`](dockify_proximity::StoreError), split into connectivity
//! and statement failures.

use dockify_proximity::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Postgres(
                e @ (sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
                | sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed),
            ) => Self::Connection(e.to_string()),
            DbError::Postgres(e) => Self::Query(e.to_string()),
            DbError::Migration(e) => Self::Query(e.to_string()),
            DbError::Config(msg) => Self::Connection(msg),
        }
    }
}
