use crate::errors::repository::RepositoryError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// The closed set of failure kinds callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationFailed,
    ReferenceNotFound,
    NotFound,
    Conflict,
    InvalidStatus,
    Forbidden,
    PersistenceFailed,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::ValidationFailed,
            ServiceError::InvalidStatus(_) => ErrorKind::InvalidStatus,
            ServiceError::Forbidden(_) => ErrorKind::Forbidden,
            ServiceError::Internal(_) => ErrorKind::PersistenceFailed,
            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => ErrorKind::NotFound,
                RepositoryError::Conflict(_) => ErrorKind::Conflict,
                RepositoryError::ReferenceNotFound(_) => ErrorKind::ReferenceNotFound,
                RepositoryError::ForeignKey(_)
                | RepositoryError::Sqlx(_)
                | RepositoryError::Custom(_) => ErrorKind::PersistenceFailed,
            },
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let messages = errors
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        ServiceError::Validation(messages)
    }
}
