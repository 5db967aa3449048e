//! Database module for PostgreSQL connection and operations.
//!
//! Every query function is a method on [`DatabasePool`] and issues a single
//! statement through the shared pool.

mod pool;
mod properties;
mod reservations;
mod schema;
mod users;

pub use pool::DatabasePool;
pub use schema::*;

use crate::error::DbError;

/// Row cap used when the caller has no preference.
pub const DEFAULT_LIMIT: i64 = 10;

fn check_limit(limit: i64) -> Result<(), DbError> {
    if limit < 0 {
        return Err(DbError::InvalidRequest(format!(
            "limit must not be negative, got {}",
            limit
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_limit() {
        assert!(check_limit(0).is_ok());
        assert!(check_limit(DEFAULT_LIMIT).is_ok());
        assert!(matches!(check_limit(-1), Err(DbError::InvalidRequest(_))));
    }
}
