use crate::entities::{AuthToken, User};
use crate::errors::{DomainError, FieldErrors};
use crate::hasher::PasswordHasher;
use crate::repositories::{TokenRepository, UserRepository};
use std::sync::Arc;

const MIN_PASSWORD_LEN: usize = 5;

/// Registration, login and token authentication. Acts as the identity
/// provider for the resource API.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    /// Create a new account. The password is validated in plaintext and
    /// stored only as a hash.
    pub async fn register(
        &self,
        email: String,
        password: String,
        name: String,
    ) -> Result<User, DomainError> {
        let user = User::new(email, name, String::new());

        let mut errors = user.field_errors();
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        errors.into_result()?;

        if self.users.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Validation(FieldErrors::single(
                "email",
                "a user with this email already exists",
            )));
        }

        let user = User {
            password_hash: self.hasher.hash(&password)?,
            ..user
        };
        self.users.save(&user).await
    }

    /// Verify credentials and issue a fresh bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthToken, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        let user_id = user
            .id
            .ok_or_else(|| DomainError::RepositoryError("persisted user without id".to_string()))?;
        self.tokens.save(&AuthToken::issue(user_id)).await
    }

    /// Resolve a bearer token to its user. Unknown tokens and dangling user
    /// ids both surface as `InvalidToken`.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let user_id = self
            .tokens
            .find_user_id(token)
            .await?
            .ok_or(DomainError::InvalidToken)?;

        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::InvalidToken)
    }
}
