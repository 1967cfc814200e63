pub mod ingredient_service;
pub mod recipe_service;
pub mod tag_service;
pub mod user_service;

pub use ingredient_service::IngredientService;
pub use recipe_service::RecipeService;
pub use tag_service::TagService;
pub use user_service::UserService;
