use crate::entities::Ingredient;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Owner-scoped port, same shape as `TagRepository`.
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Ingredients owned by `owner_id`, sorted by name descending.
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Ingredient>, DomainError>;

    /// The subset of `ids` that exist and belong to `owner_id`, sorted by id
    /// ascending.
    async fn find_by_ids(&self, owner_id: i32, ids: &[i32])
        -> Result<Vec<Ingredient>, DomainError>;

    async fn save(&self, ingredient: &Ingredient) -> Result<Ingredient, DomainError>;
}
