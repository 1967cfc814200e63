use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::{DomainError, FieldErrors};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::error;

/// Everything a handler can fail with, mapped onto the HTTP error contract.
pub enum ApiError {
    Domain(DomainError),
    /// No `Authorization` header, or one that is not a bearer token.
    MissingCredentials,
    /// Body that could not be parsed into the request type.
    MalformedBody(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

/// Folds field errors into the `{field: [messages...]}` wire shape.
fn field_error_body(errors: FieldErrors) -> Value {
    let mut fields: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for error in errors.0 {
        fields.entry(error.field).or_default().push(error.message);
    }
    json!(fields)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Domain(DomainError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, field_error_body(errors))
            }
            ApiError::Domain(DomainError::InvalidCredentials) => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": "unable to authenticate with provided credentials" }),
            ),
            ApiError::Domain(DomainError::InvalidToken) => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "invalid authentication token" }),
            ),
            ApiError::Domain(DomainError::RecipeNotFound(_) | DomainError::UserNotFound(_)) => {
                (StatusCode::NOT_FOUND, json!({ "detail": "not found" }))
            }
            ApiError::Domain(
                err @ (DomainError::RepositoryError(_) | DomainError::HashingError(_)),
            ) => {
                error!("internal error handling request: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "internal server error" }),
                )
            }
            ApiError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "detail": "authentication credentials were not provided" }),
            ),
            ApiError::MalformedBody(detail) => (StatusCode::BAD_REQUEST, json!({ "detail": detail })),
        };

        (status, Json(body)).into_response()
    }
}
