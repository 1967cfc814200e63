use crate::entities::Ingredient;
use crate::errors::DomainError;
use crate::repositories::IngredientRepository;
use std::sync::Arc;

pub struct IngredientService {
    ingredients: Arc<dyn IngredientRepository>,
}

impl IngredientService {
    pub fn new(ingredients: Arc<dyn IngredientRepository>) -> Self {
        Self { ingredients }
    }

    /// Ingredients owned by the caller, name descending.
    pub async fn list_ingredients(&self, owner_id: i32) -> Result<Vec<Ingredient>, DomainError> {
        self.ingredients.find_for_owner(owner_id).await
    }

    pub async fn create_ingredient(
        &self,
        owner_id: i32,
        name: String,
    ) -> Result<Ingredient, DomainError> {
        let ingredient = Ingredient::new(owner_id, name);
        ingredient.validate()?;
        self.ingredients.save(&ingredient).await
    }
}
