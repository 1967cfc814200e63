use crate::entities::AuthToken;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn save(&self, token: &AuthToken) -> Result<AuthToken, DomainError>;

    /// Resolves a bearer token to the owning user id, if the token exists.
    async fn find_user_id(&self, token: &str) -> Result<Option<i32>, DomainError>;
}
