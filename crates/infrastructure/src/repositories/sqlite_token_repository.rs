use crate::database::{auth_tokens, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{AuthToken, DomainError, TokenRepository};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = auth_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct TokenModel {
    id: i32,
    user_id: i32,
    token: String,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = auth_tokens)]
struct NewTokenModel {
    user_id: i32,
    token: String,
    created_at: NaiveDateTime,
}

impl From<TokenModel> for AuthToken {
    fn from(model: TokenModel) -> Self {
        AuthToken::with_id(model.id, model.user_id, model.token)
    }
}

impl From<&AuthToken> for NewTokenModel {
    fn from(token: &AuthToken) -> Self {
        NewTokenModel {
            user_id: token.user_id,
            token: token.token.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn save(&self, token: &AuthToken) -> Result<AuthToken, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_token = NewTokenModel::from(token);

        let result = tokio::task::spawn_blocking(move || {
            // Insert and readback share one transaction so the last-row
            // lookup cannot observe a concurrent insert.
            conn.transaction(|conn| {
                diesel::insert_into(auth_tokens::table)
                    .values(&new_token)
                    .execute(conn)?;

                auth_tokens::table
                    .order(auth_tokens::id.desc())
                    .select(TokenModel::as_select())
                    .first::<TokenModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_user_id(&self, token: &str) -> Result<Option<i32>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let token = token.to_string();
        let result = tokio::task::spawn_blocking(move || {
            auth_tokens::table
                .filter(auth_tokens::token.eq(token))
                .select(auth_tokens::user_id)
                .first::<i32>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result)
    }
}
