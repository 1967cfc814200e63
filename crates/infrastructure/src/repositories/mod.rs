pub mod memory;
pub mod sqlite_ingredient_repository;
pub mod sqlite_recipe_repository;
pub mod sqlite_tag_repository;
pub mod sqlite_token_repository;
pub mod sqlite_user_repository;

pub use memory::{
    InMemoryIngredientRepository, InMemoryRecipeRepository, InMemoryTagRepository,
    InMemoryTokenRepository, InMemoryUserRepository,
};
pub use sqlite_ingredient_repository::SqliteIngredientRepository;
pub use sqlite_recipe_repository::SqliteRecipeRepository;
pub use sqlite_tag_repository::SqliteTagRepository;
pub use sqlite_token_repository::SqliteTokenRepository;
pub use sqlite_user_repository::SqliteUserRepository;
