use std::sync::Arc;

use domain::{
    DomainError, IngredientRepository, IngredientService, PasswordHasher, RecipeRepository,
    RecipeService, TagRepository, TagService, TokenRepository, UserRepository, UserService,
};
use infrastructure::auth::Argon2PasswordHasher;
use infrastructure::database::Database;
use infrastructure::repositories::{
    InMemoryIngredientRepository, InMemoryRecipeRepository, InMemoryTagRepository,
    InMemoryTokenRepository, InMemoryUserRepository, SqliteIngredientRepository,
    SqliteRecipeRepository, SqliteTagRepository, SqliteTokenRepository, SqliteUserRepository,
};

#[cfg(test)]
mod tests;

/// Composition root: wires repositories and the password hasher into the
/// services the HTTP layer talks to.
pub struct RecipeApp {
    pub users: Arc<UserService>,
    pub tags: Arc<TagService>,
    pub ingredients: Arc<IngredientService>,
    pub recipes: Arc<RecipeService>,
}

impl RecipeApp {
    /// Production wiring over the SQLite database at `database_path`.
    /// Creates the schema on first run.
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        let database = Database::new(database_path)?;
        let pool = database.get_pool();

        Ok(Self::wire(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            Arc::new(SqliteTokenRepository::new(pool.clone())),
            Arc::new(SqliteTagRepository::new(pool.clone())),
            Arc::new(SqliteIngredientRepository::new(pool.clone())),
            Arc::new(SqliteRecipeRepository::new(pool)),
            Arc::new(Argon2PasswordHasher),
        ))
    }

    /// Everything held in process memory; used by tests.
    pub fn in_memory() -> Self {
        Self::wire(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryTokenRepository::default()),
            Arc::new(InMemoryTagRepository::default()),
            Arc::new(InMemoryIngredientRepository::default()),
            Arc::new(InMemoryRecipeRepository::default()),
            Arc::new(Argon2PasswordHasher),
        )
    }

    fn wire(
        users: Arc<dyn UserRepository>,
        tokens: Arc<dyn TokenRepository>,
        tags: Arc<dyn TagRepository>,
        ingredients: Arc<dyn IngredientRepository>,
        recipes: Arc<dyn RecipeRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(users, tokens, hasher)),
            tags: Arc::new(TagService::new(tags.clone())),
            ingredients: Arc::new(IngredientService::new(ingredients.clone())),
            recipes: Arc::new(RecipeService::new(recipes, tags, ingredients)),
        }
    }
}
