use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use domain::{DomainError, User};

use crate::error::ApiError;
use crate::routes::AppState;

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header before any handler logic runs. Handlers receive it explicitly;
/// there is no ambient current-user state.
pub struct AuthUser {
    pub id: i32,
    pub user: User,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::MissingCredentials)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::MissingCredentials)?;

        let user = state.app.users.authenticate(token).await?;
        let id = user.id.ok_or_else(|| {
            ApiError::Domain(DomainError::RepositoryError(
                "authenticated user without id".to_string(),
            ))
        })?;

        Ok(AuthUser { id, user })
    }
}
