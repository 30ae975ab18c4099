//! Authentication logic: the remember-me token ledger and the session
//! bridge that connects it to the request layer.

pub mod remember_tokens;
pub mod session;

use thiserror::Error;

/// Authentication errors.
///
/// "Token not found" is not an error — the lookup paths return `Option`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The store could not be reached (pool timeout, closed pool, I/O).
    /// Non-fatal: degrades the remember-me feature.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An individual query or transaction failed after a connection was
    /// acquired.
    #[error("storage failure: {0}")]
    Storage(sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Malformed caller input, rejected before any storage call.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AuthError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AuthError::StorageUnavailable(e.to_string())
            }
            _ => AuthError::Storage(e),
        }
    }
}

impl From<crate::db::StoreError> for AuthError {
    fn from(e: crate::db::StoreError) -> Self {
        match e {
            crate::db::StoreError::InvalidUrl(e) => AuthError::StorageUnavailable(e.to_string()),
            crate::db::StoreError::Sql(e) => AuthError::from(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_level_failures_classify_as_unavailable() {
        assert!(matches!(
            AuthError::from(sqlx::Error::PoolTimedOut),
            AuthError::StorageUnavailable(_)
        ));
        assert!(matches!(
            AuthError::from(sqlx::Error::PoolClosed),
            AuthError::StorageUnavailable(_)
        ));
    }

    #[test]
    fn query_level_failures_classify_as_storage() {
        assert!(matches!(
            AuthError::from(sqlx::Error::RowNotFound),
            AuthError::Storage(_)
        ));
    }
}
