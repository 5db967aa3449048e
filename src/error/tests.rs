//! Unit tests for error module.

use super::*;

// ============================================================================
// Display Tests
// ============================================================================

#[test]
fn test_not_found_display() {
    let error = DbError::NotFound("reservation 3".to_string());
    assert_eq!(format!("{}", error), "Not found: reservation 3");
}

#[test]
fn test_invalid_request_display() {
    let error = DbError::InvalidRequest("start_date must precede end_date".to_string());
    assert_eq!(
        format!("{}", error),
        "Invalid request: start_date must precede end_date"
    );
}

#[test]
fn test_conflict_display() {
    let error = DbError::Conflict("email already registered".to_string());
    assert_eq!(format!("{}", error), "Conflict: email already registered");
}

#[test]
fn test_database_display() {
    let error = DbError::Database(sqlx::Error::PoolTimedOut);
    assert!(format!("{}", error).starts_with("Database error: "));
}

// ============================================================================
// Conversion Tests
// ============================================================================

#[test]
fn test_from_sqlx_row_not_found_is_database() {
    let error = DbError::from(sqlx::Error::RowNotFound);
    assert!(matches!(error, DbError::Database(sqlx::Error::RowNotFound)));
}

#[test]
fn test_from_sqlx_pool_closed_is_database() {
    let error = DbError::from(sqlx::Error::PoolClosed);
    assert!(matches!(error, DbError::Database(_)));
    assert!(!error.is_client_error());
}

#[test]
fn test_query_failed_converts() {
    let error = query_failed("get_user_with_id")(sqlx::Error::PoolTimedOut);
    assert!(matches!(error, DbError::Database(sqlx::Error::PoolTimedOut)));
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_client_errors() {
    assert!(DbError::NotFound("x".to_string()).is_client_error());
    assert!(DbError::InvalidRequest("x".to_string()).is_client_error());
    assert!(DbError::Conflict("x".to_string()).is_client_error());
}
