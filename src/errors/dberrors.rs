use std::fmt;

/// Errors raised by a storage backend.
#[derive(Debug)]
pub enum StoreError {
    ConnectionError(String),
    QueryError(String),
    MigrationError(String),
    /// A record failed the shape check before it reached the backend.
    InvalidRecord(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ConnectionError(msg) => write!(f, "Storage connection error: {}", msg),
            StoreError::QueryError(msg) => write!(f, "Storage query error: {}", msg),
            StoreError::MigrationError(msg) => write!(f, "Storage migration error: {}", msg),
            StoreError::InvalidRecord(msg) => write!(f, "Invalid record: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::ConnectionError(err.to_string())
            }
            _ => StoreError::QueryError(err.to_string()),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationError(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let error = StoreError::ConnectionError("refused".to_string());
        assert_eq!(format!("{}", error), "Storage connection error: refused");
    }

    #[test]
    fn test_invalid_record_display() {
        let error = StoreError::InvalidRecord("amount must be finite".to_string());
        assert_eq!(error.to_string(), "Invalid record: amount must be finite");
    }

    #[test]
    fn test_all_variants_are_unique() {
        let messages = [
            StoreError::ConnectionError("x".into()).to_string(),
            StoreError::QueryError("x".into()).to_string(),
            StoreError::MigrationError("x".into()).to_string(),
            StoreError::InvalidRecord("x".into()).to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error;
        let error = StoreError::QueryError("boom".to_string());
        assert!(error.source().is_none());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_from_sqlx_pool_timeout_is_connection_error() {
        let error: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(error, StoreError::ConnectionError(_)));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_from_sqlx_row_not_found_is_query_error() {
        let error: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, StoreError::QueryError(_)));
    }
}
