//! Error types for the data-access layer.

use tracing::error;

#[cfg(test)]
mod tests;

/// Data-access error types.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Requested row does not exist.
    ///
    /// The query functions report missing rows as `Ok(None)` or `Ok(0)`; this
    /// variant is for callers that need to turn an absent row into an error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input rejected before or by the database (bad ranges, dangling
    /// references, check constraints).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unique constraint violated, e.g. an email already registered.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Schema migration failure.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return DbError::Conflict(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() || db_err.is_check_violation() {
                return DbError::InvalidRequest(db_err.message().to_string());
            }
        }
        DbError::Database(err)
    }
}

impl DbError {
    /// Returns `true` for errors caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DbError::NotFound(_) | DbError::InvalidRequest(_) | DbError::Conflict(_)
        )
    }
}

/// Logs a failed query under `operation` and converts it into a [`DbError`].
pub(crate) fn query_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |err| {
        error!(operation, error = %err, "query failed");
        DbError::from(err)
    }
}
