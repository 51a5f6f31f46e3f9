//! Error handling utilities for repositories

use bans_core::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_db_error() {
        let err = map_db_error(SqlxError::RowNotFound);
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(!err.is_transient());
    }
}
