use crate::database::{recipe_ingredients, recipe_tags, recipes, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Recipe, RecipeRepository};
use std::collections::HashMap;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct RecipeModel {
    id: i32,
    user_id: i32,
    title: String,
    time_minutes: i32,
    price: f64,
    #[allow(dead_code)]
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = recipes)]
struct NewRecipeModel {
    user_id: i32,
    title: String,
    time_minutes: i32,
    price: f64,
    created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = recipe_tags)]
struct NewRecipeTagRow {
    recipe_id: i32,
    tag_id: i32,
}

#[derive(Insertable)]
#[diesel(table_name = recipe_ingredients)]
struct NewRecipeIngredientRow {
    recipe_id: i32,
    ingredient_id: i32,
}

impl From<&Recipe> for NewRecipeModel {
    fn from(recipe: &Recipe) -> Self {
        NewRecipeModel {
            user_id: recipe.owner_id,
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

fn build_recipe(model: RecipeModel, tag_ids: Vec<i32>, ingredient_ids: Vec<i32>) -> Recipe {
    Recipe::with_id(
        model.id,
        model.user_id,
        model.title,
        model.time_minutes,
        model.price,
        tag_ids,
        ingredient_ids,
    )
}

/// Loads association ids for the given recipes, grouped per recipe.
fn load_association_maps(
    conn: &mut SqliteConnection,
    recipe_ids: &[i32],
) -> Result<(HashMap<i32, Vec<i32>>, HashMap<i32, Vec<i32>>), diesel::result::Error> {
    let tag_rows: Vec<(i32, i32)> = recipe_tags::table
        .filter(recipe_tags::recipe_id.eq_any(recipe_ids.to_vec()))
        .order((recipe_tags::recipe_id, recipe_tags::tag_id))
        .select((recipe_tags::recipe_id, recipe_tags::tag_id))
        .load(conn)?;

    let ingredient_rows: Vec<(i32, i32)> = recipe_ingredients::table
        .filter(recipe_ingredients::recipe_id.eq_any(recipe_ids.to_vec()))
        .order((recipe_ingredients::recipe_id, recipe_ingredients::ingredient_id))
        .select((
            recipe_ingredients::recipe_id,
            recipe_ingredients::ingredient_id,
        ))
        .load(conn)?;

    let mut tag_map: HashMap<i32, Vec<i32>> = HashMap::new();
    for (recipe_id, tag_id) in tag_rows {
        tag_map.entry(recipe_id).or_default().push(tag_id);
    }

    let mut ingredient_map: HashMap<i32, Vec<i32>> = HashMap::new();
    for (recipe_id, ingredient_id) in ingredient_rows {
        ingredient_map.entry(recipe_id).or_default().push(ingredient_id);
    }

    Ok((tag_map, ingredient_map))
}

pub struct SqliteRecipeRepository {
    pool: SqlitePool,
}

impl SqliteRecipeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecipeRepository for SqliteRecipeRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            let models = recipes::table
                .filter(recipes::user_id.eq(owner_id))
                .order(recipes::id.desc())
                .select(RecipeModel::as_select())
                .load::<RecipeModel>(&mut conn)?;

            let recipe_ids: Vec<i32> = models.iter().map(|m| m.id).collect();
            let (mut tag_map, mut ingredient_map) = load_association_maps(&mut conn, &recipe_ids)?;

            Ok::<_, diesel::result::Error>(
                models
                    .into_iter()
                    .map(|model| {
                        let tags = tag_map.remove(&model.id).unwrap_or_default();
                        let ingredients = ingredient_map.remove(&model.id).unwrap_or_default();
                        build_recipe(model, tags, ingredients)
                    })
                    .collect::<Vec<Recipe>>(),
            )
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result)
    }

    async fn find_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Recipe>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            // Owner filter in the query itself: another user's recipe id
            // behaves exactly like a nonexistent one.
            let model = recipes::table
                .filter(recipes::user_id.eq(owner_id))
                .filter(recipes::id.eq(id))
                .select(RecipeModel::as_select())
                .first::<RecipeModel>(&mut conn)
                .optional()?;

            let Some(model) = model else {
                return Ok::<_, diesel::result::Error>(None);
            };

            let (mut tag_map, mut ingredient_map) = load_association_maps(&mut conn, &[model.id])?;
            let tags = tag_map.remove(&model.id).unwrap_or_default();
            let ingredients = ingredient_map.remove(&model.id).unwrap_or_default();
            Ok(Some(build_recipe(model, tags, ingredients)))
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result)
    }

    async fn save(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_recipe = NewRecipeModel::from(recipe);
        let tag_ids = recipe.tags.clone();
        let ingredient_ids = recipe.ingredients.clone();

        let result = tokio::task::spawn_blocking(move || {
            // Recipe row and association rows land in one transaction; a
            // failed reference insert rolls back the whole creation.
            conn.transaction(|conn| {
                diesel::insert_into(recipes::table)
                    .values(&new_recipe)
                    .execute(conn)?;

                let model = recipes::table
                    .order(recipes::id.desc())
                    .select(RecipeModel::as_select())
                    .first::<RecipeModel>(conn)?;

                if !tag_ids.is_empty() {
                    let tag_rows: Vec<NewRecipeTagRow> = tag_ids
                        .iter()
                        .map(|&tag_id| NewRecipeTagRow {
                            recipe_id: model.id,
                            tag_id,
                        })
                        .collect();
                    diesel::insert_into(recipe_tags::table)
                        .values(&tag_rows)
                        .execute(conn)?;
                }

                if !ingredient_ids.is_empty() {
                    let ingredient_rows: Vec<NewRecipeIngredientRow> = ingredient_ids
                        .iter()
                        .map(|&ingredient_id| NewRecipeIngredientRow {
                            recipe_id: model.id,
                            ingredient_id,
                        })
                        .collect();
                    diesel::insert_into(recipe_ingredients::table)
                        .values(&ingredient_rows)
                        .execute(conn)?;
                }

                Ok::<_, diesel::result::Error>(build_recipe(model, tag_ids, ingredient_ids))
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result)
    }
}
