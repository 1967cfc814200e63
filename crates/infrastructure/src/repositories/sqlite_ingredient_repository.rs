use crate::database::{ingredients, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, Ingredient, IngredientRepository};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct IngredientModel {
    id: i32,
    user_id: i32,
    name: String,
}

#[derive(Insertable)]
#[diesel(table_name = ingredients)]
struct NewIngredientModel {
    user_id: i32,
    name: String,
}

impl From<IngredientModel> for Ingredient {
    fn from(model: IngredientModel) -> Self {
        Ingredient::with_id(model.id, model.user_id, model.name)
    }
}

impl From<&Ingredient> for NewIngredientModel {
    fn from(ingredient: &Ingredient) -> Self {
        NewIngredientModel {
            user_id: ingredient.owner_id,
            name: ingredient.name.clone(),
        }
    }
}

pub struct SqliteIngredientRepository {
    pool: SqlitePool,
}

impl SqliteIngredientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for SqliteIngredientRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Ingredient>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            ingredients::table
                .filter(ingredients::user_id.eq(owner_id))
                .order(ingredients::name.desc())
                .select(IngredientModel::as_select())
                .load::<IngredientModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn find_by_ids(
        &self,
        owner_id: i32,
        ids: &[i32],
    ) -> Result<Vec<Ingredient>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let ids = ids.to_vec();
        let result = tokio::task::spawn_blocking(move || {
            ingredients::table
                .filter(ingredients::user_id.eq(owner_id))
                .filter(ingredients::id.eq_any(ids))
                .order(ingredients::id.asc())
                .select(IngredientModel::as_select())
                .load::<IngredientModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn save(&self, ingredient: &Ingredient) -> Result<Ingredient, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_ingredient = NewIngredientModel::from(ingredient);

        let result = tokio::task::spawn_blocking(move || {
            // Insert and readback share one transaction so the last-row
            // lookup cannot observe a concurrent insert.
            conn.transaction(|conn| {
                diesel::insert_into(ingredients::table)
                    .values(&new_ingredient)
                    .execute(conn)?;

                ingredients::table
                    .order(ingredients::id.desc())
                    .select(IngredientModel::as_select())
                    .first::<IngredientModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into())
    }
}
