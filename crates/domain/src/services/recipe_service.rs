use crate::entities::{Recipe, RecipeDetail};
use crate::errors::{DomainError, FieldErrors};
use crate::repositories::{IngredientRepository, RecipeRepository, TagRepository};
use std::collections::HashSet;
use std::sync::Arc;

/// Recipe business logic. Referenced tag/ingredient ids must exist and
/// belong to the caller; a foreign id fails validation the same way a
/// nonexistent one does, so nothing leaks about other users' data.
pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    tags: Arc<dyn TagRepository>,
    ingredients: Arc<dyn IngredientRepository>,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        tags: Arc<dyn TagRepository>,
        ingredients: Arc<dyn IngredientRepository>,
    ) -> Self {
        Self {
            recipes,
            tags,
            ingredients,
        }
    }

    /// Recipes owned by the caller, id descending (newest first).
    pub async fn list_recipes(&self, owner_id: i32) -> Result<Vec<Recipe>, DomainError> {
        self.recipes.find_for_owner(owner_id).await
    }

    pub async fn get_recipe(&self, owner_id: i32, id: i32) -> Result<Recipe, DomainError> {
        self.recipes
            .find_by_id(owner_id, id)
            .await?
            .ok_or(DomainError::RecipeNotFound(id))
    }

    /// Detail form: associations expanded to full tag/ingredient objects.
    pub async fn get_recipe_detail(
        &self,
        owner_id: i32,
        id: i32,
    ) -> Result<RecipeDetail, DomainError> {
        let recipe = self.get_recipe(owner_id, id).await?;
        let tags = self.tags.find_by_ids(owner_id, &recipe.tags).await?;
        let ingredients = self
            .ingredients
            .find_by_ids(owner_id, &recipe.ingredients)
            .await?;

        Ok(RecipeDetail {
            recipe,
            tags,
            ingredients,
        })
    }

    pub async fn create_recipe(
        &self,
        owner_id: i32,
        title: String,
        time_minutes: i32,
        price: f64,
        tag_ids: Vec<i32>,
        ingredient_ids: Vec<i32>,
    ) -> Result<Recipe, DomainError> {
        let recipe = Recipe::new(owner_id, title, time_minutes, price, tag_ids, ingredient_ids);

        let mut errors = recipe.field_errors();

        let known_tags = self.tags.find_by_ids(owner_id, &recipe.tags).await?;
        for id in missing_ids(&recipe.tags, known_tags.iter().filter_map(|t| t.id)) {
            errors.push("tags", format!("tag with id {id} does not exist"));
        }

        let known_ingredients = self
            .ingredients
            .find_by_ids(owner_id, &recipe.ingredients)
            .await?;
        for id in missing_ids(
            &recipe.ingredients,
            known_ingredients.iter().filter_map(|i| i.id),
        ) {
            errors.push("ingredients", format!("ingredient with id {id} does not exist"));
        }

        errors.into_result()?;
        self.recipes.save(&recipe).await
    }
}

fn missing_ids(requested: &[i32], found: impl Iterator<Item = i32>) -> Vec<i32> {
    let found: HashSet<i32> = found.collect();
    requested
        .iter()
        .copied()
        .filter(|id| !found.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::missing_ids;

    #[test]
    fn missing_ids_preserves_request_order() {
        let missing = missing_ids(&[1, 2, 3, 4], [2, 4].into_iter());
        assert_eq!(missing, vec![1, 3]);
    }

    #[test]
    fn no_missing_ids_when_all_found() {
        assert!(missing_ids(&[1, 2], [1, 2].into_iter()).is_empty());
    }
}
