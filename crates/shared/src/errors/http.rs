use crate::errors::{
    error::ErrorResponse,
    service::{ErrorKind, ServiceError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub struct HttpError {
    pub kind: ErrorKind,
    pub message: String,
}

impl HttpError {
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::ValidationFailed | ErrorKind::InvalidStatus => StatusCode::BAD_REQUEST,
            ErrorKind::ReferenceNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::PersistenceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        let kind = err.kind();

        // storage faults are logged by the service; don't leak driver text
        let message = match kind {
            ErrorKind::PersistenceFailed => "Internal server error".to_string(),
            _ => err.to_string(),
        };

        HttpError { kind, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = Json(ErrorResponse {
            status: "error".into(),
            kind: self.kind,
            message: self.message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RepositoryError;

    #[test]
    fn maps_kinds_to_status_codes() {
        let cases = [
            (ServiceError::Validation(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidStatus("x".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::Repo(RepositoryError::ReferenceNotFound("7".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ServiceError::Repo(RepositoryError::NotFound), StatusCode::NOT_FOUND),
            (
                ServiceError::Repo(RepositoryError::Conflict("done".into())),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Repo(RepositoryError::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(HttpError::from(err).status_code(), expected);
        }
    }

    #[test]
    fn hides_persistence_details() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::Custom(
            "connection reset by peer".into(),
        )));

        assert_eq!(err.kind, ErrorKind::PersistenceFailed);
        assert_eq!(err.message, "Internal server error");
    }
}
