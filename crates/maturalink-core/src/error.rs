//! Core error types.

use rusqlite::ffi;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors.
#[derive(Debug, Error)]
pub enum Error {
    /// SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity type name.
        entity: &'static str,
        /// Requested identifier.
        id: i64,
    },

    /// Input failed field validation.
    #[error("{0}")]
    Validation(String),

    /// Foreign key or restrict violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Unique constraint violation.
    #[error("duplicate entry: {0}")]
    Duplicate(String),

    /// Database file was written by a newer schema.
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        /// Version found in the database.
        db_version: u32,
        /// Latest version known to this build.
        latest_supported: u32,
    },

    /// Storage work reached its deadline before it could start or commit.
    #[error("deadline exceeded before storage work completed")]
    DeadlineExceeded,
}

impl Error {
    /// Build a not-found error.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    /// Whether this error is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Classify a SQLite error raised while writing `what`.
    ///
    /// Unique violations become [`Error::Duplicate`], any other constraint
    /// failure becomes [`Error::Constraint`].
    pub(crate) fn from_write(err: rusqlite::Error, what: &str) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                let detail = message.clone().unwrap_or_else(|| code.to_string());
                match code.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        Error::Duplicate(format!("{what}: {detail}"))
                    }
                    _ => Error::Constraint(format!("{what}: {detail}")),
                }
            }
            _ => Error::Sqlite(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::not_found("subject", 7);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "subject not found: 7");
    }

    #[test]
    fn test_non_constraint_error_passes_through() {
        let err = Error::from_write(rusqlite::Error::QueryReturnedNoRows, "subject");
        assert!(matches!(err, Error::Sqlite(_)));
    }
}
