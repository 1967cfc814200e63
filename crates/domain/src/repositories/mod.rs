pub mod ingredient_repository;
pub mod recipe_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;

pub use ingredient_repository::IngredientRepository;
pub use recipe_repository::RecipeRepository;
pub use tag_repository::TagRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;
