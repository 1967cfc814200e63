//! In-memory implementations of the repository ports, backed by mutex-held
//! vectors. They mirror the ordering and owner-scoping semantics of the
//! SQLite adapters and back the service- and API-level tests.

use async_trait::async_trait;
use domain::{
    AuthToken, DomainError, Ingredient, IngredientRepository, Recipe, RecipeRepository, Tag,
    TagRepository, TokenRepository, User, UserRepository,
};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|e| DomainError::RepositoryError(format!("repository lock poisoned: {e}")))
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.rows)?.iter().find(|u| u.id == Some(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(lock(&self.rows)?.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: &User) -> Result<User, DomainError> {
        let mut rows = lock(&self.rows)?;
        let mut user = user.clone();
        user.id = Some(rows.len() as i32 + 1);
        rows.push(user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    rows: Mutex<Vec<AuthToken>>,
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn save(&self, token: &AuthToken) -> Result<AuthToken, DomainError> {
        let mut rows = lock(&self.rows)?;
        let mut token = token.clone();
        token.id = Some(rows.len() as i32 + 1);
        rows.push(token.clone());
        Ok(token)
    }

    async fn find_user_id(&self, token: &str) -> Result<Option<i32>, DomainError> {
        Ok(lock(&self.rows)?
            .iter()
            .find(|t| t.token == token)
            .map(|t| t.user_id))
    }
}

#[derive(Default)]
pub struct InMemoryTagRepository {
    rows: Mutex<Vec<Tag>>,
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Tag>, DomainError> {
        let mut tags: Vec<Tag> = lock(&self.rows)?
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        tags.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(tags)
    }

    async fn find_by_ids(&self, owner_id: i32, ids: &[i32]) -> Result<Vec<Tag>, DomainError> {
        let mut tags: Vec<Tag> = lock(&self.rows)?
            .iter()
            .filter(|t| t.owner_id == owner_id && t.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect();
        tags.sort_by_key(|t| t.id);
        Ok(tags)
    }

    async fn save(&self, tag: &Tag) -> Result<Tag, DomainError> {
        let mut rows = lock(&self.rows)?;
        let mut tag = tag.clone();
        tag.id = Some(rows.len() as i32 + 1);
        rows.push(tag.clone());
        Ok(tag)
    }
}

#[derive(Default)]
pub struct InMemoryIngredientRepository {
    rows: Mutex<Vec<Ingredient>>,
}

#[async_trait]
impl IngredientRepository for InMemoryIngredientRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Ingredient>, DomainError> {
        let mut ingredients: Vec<Ingredient> = lock(&self.rows)?
            .iter()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(ingredients)
    }

    async fn find_by_ids(
        &self,
        owner_id: i32,
        ids: &[i32],
    ) -> Result<Vec<Ingredient>, DomainError> {
        let mut ingredients: Vec<Ingredient> = lock(&self.rows)?
            .iter()
            .filter(|i| i.owner_id == owner_id && i.id.is_some_and(|id| ids.contains(&id)))
            .cloned()
            .collect();
        ingredients.sort_by_key(|i| i.id);
        Ok(ingredients)
    }

    async fn save(&self, ingredient: &Ingredient) -> Result<Ingredient, DomainError> {
        let mut rows = lock(&self.rows)?;
        let mut ingredient = ingredient.clone();
        ingredient.id = Some(rows.len() as i32 + 1);
        rows.push(ingredient.clone());
        Ok(ingredient)
    }
}

#[derive(Default)]
pub struct InMemoryRecipeRepository {
    rows: Mutex<Vec<Recipe>>,
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, DomainError> {
        let mut recipes: Vec<Recipe> = lock(&self.rows)?
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(recipes)
    }

    async fn find_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Recipe>, DomainError> {
        Ok(lock(&self.rows)?
            .iter()
            .find(|r| r.owner_id == owner_id && r.id == Some(id))
            .cloned())
    }

    async fn save(&self, recipe: &Recipe) -> Result<Recipe, DomainError> {
        let mut rows = lock(&self.rows)?;
        let mut recipe = recipe.clone();
        recipe.id = Some(rows.len() as i32 + 1);
        rows.push(recipe.clone());
        Ok(recipe)
    }
}
