use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl RepositoryError {
    /// Classifies a driver error. Lifecycle conflicts are detected by the
    /// repositories themselves; any other constraint violation, unique
    /// ones included, stays a storage fault.
    pub fn from_db(err: SqlxError) -> Self {
        match &err {
            SqlxError::RowNotFound => RepositoryError::NotFound,
            SqlxError::Database(db) if db.is_foreign_key_violation() => {
                RepositoryError::ForeignKey(db.message().to_string())
            }
            _ => RepositoryError::Sqlx(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, ServiceError};
    use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};
    use std::{borrow::Cow, error::Error as StdError, fmt};

    #[derive(Debug)]
    struct PgViolation {
        unique: bool,
    }

    impl fmt::Display for PgViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message())
        }
    }

    impl StdError for PgViolation {}

    impl DatabaseError for PgViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> DbErrorKind {
            if self.unique {
                DbErrorKind::UniqueViolation
            } else {
                DbErrorKind::ForeignKeyViolation
            }
        }
    }

    fn violation(unique: bool) -> RepositoryError {
        RepositoryError::from_db(SqlxError::Database(Box::new(PgViolation { unique })))
    }

    #[test]
    fn unique_violations_are_persistence_faults() {
        let err = violation(true);
        assert!(matches!(err, RepositoryError::Sqlx(_)));
        assert_eq!(ServiceError::Repo(err).kind(), ErrorKind::PersistenceFailed);
    }

    #[test]
    fn driver_errors_are_classified() {
        assert!(matches!(
            RepositoryError::from_db(SqlxError::RowNotFound),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            violation(false),
            RepositoryError::ForeignKey(_)
        ));
    }
}
