use crate::database::{users, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use domain::{DomainError, FieldErrors, User, UserRepository};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct UserModel {
    id: i32,
    email: String,
    name: String,
    password_hash: String,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = users)]
struct NewUserModel {
    email: String,
    name: String,
    password_hash: String,
    created_at: NaiveDateTime,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User::with_id(model.id, model.email, model.name, model.password_hash)
    }
}

impl From<&User> for NewUserModel {
    fn from(user: &User) -> Self {
        NewUserModel {
            email: user.email.clone(),
            name: user.name.clone(),
            password_hash: user.password_hash.clone(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::id.eq(id))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let email = email.to_string();
        let result = tokio::task::spawn_blocking(move || {
            users::table
                .filter(users::email.eq(email))
                .select(UserModel::as_select())
                .first::<UserModel>(&mut conn)
                .optional()
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.map(|model| model.into()))
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_user = NewUserModel::from(user);

        let result = tokio::task::spawn_blocking(move || {
            // Insert and readback share one transaction so the last-row
            // lookup cannot observe a concurrent insert.
            conn.transaction(|conn| {
                diesel::insert_into(users::table)
                    .values(&new_user)
                    .execute(conn)?;

                users::table
                    .order(users::id.desc())
                    .select(UserModel::as_select())
                    .first::<UserModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(map_insert_error)?;

        Ok(result.into())
    }
}

// The service checks email uniqueness before saving, but two concurrent
// registrations can both pass that check; the UNIQUE constraint is the
// backstop and still has to surface as the same field error.
fn map_insert_error(err: diesel::result::Error) -> DomainError {
    match err {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DomainError::Validation(FieldErrors::single(
                "email",
                "a user with this email already exists",
            ))
        }
        err => DomainError::RepositoryError(err.to_string()),
    }
}
