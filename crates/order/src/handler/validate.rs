use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::{ErrorKind, HttpError};
use validator::{Validate, ValidationErrors};

/// JSON body extractor that also runs `validator` rules, turning both
/// malformed bodies and rule violations into a `validation_failed` error.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError {
                kind: ErrorKind::ValidationFailed,
                message: rejection.body_text(),
            })?;

        value.validate().map_err(|errors| HttpError {
            kind: ErrorKind::ValidationFailed,
            message: format_validation_errors(&errors),
        })?;

        Ok(Self(value))
    }
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| match error.code.as_ref() {
                    "length" => "Invalid length".to_string(),
                    "range" => "Value out of range".to_string(),
                    _ => format!("Invalid {field}"),
                });
            messages.push(format!("{field}: {message}"));
        }
    }

    // nested item errors carry no field-level entries at the top
    if messages.is_empty() {
        errors.to_string().replace('\n', "; ")
    } else {
        messages.join("; ")
    }
}
