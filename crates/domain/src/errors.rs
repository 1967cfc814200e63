use serde::Serialize;
use thiserror::Error;

/// A single validation failure attributed to one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Collected per-field validation failures. Validation gathers every
/// problem with a payload instead of stopping at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts accumulated errors into a `DomainError`, or `Ok(())` when
    /// nothing was recorded.
    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self))
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("unable to authenticate with provided credentials")]
    InvalidCredentials,

    #[error("invalid authentication token")]
    InvalidToken,

    #[error("recipe not found with id: {0}")]
    RecipeNotFound(i32),

    #[error("user not found with id: {0}")]
    UserNotFound(i32),

    #[error("password hashing error: {0}")]
    HashingError(String),

    #[error("repository error: {0}")]
    RepositoryError(String),
}
