use crate::entities::Recipe;
use crate::errors::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Recipes owned by `owner_id`, sorted by id descending, association id
    /// lists populated.
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Recipe>, DomainError>;

    /// `None` when the id does not exist or belongs to a different owner;
    /// callers cannot distinguish the two cases.
    async fn find_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Recipe>, DomainError>;

    /// Persists the recipe row and its association rows atomically.
    async fn save(&self, recipe: &Recipe) -> Result<Recipe, DomainError>;
}
