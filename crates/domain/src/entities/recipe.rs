use serde::{Deserialize, Serialize};

use crate::entities::{Ingredient, Tag};
use crate::errors::{DomainError, FieldErrors};

/// Core Recipe entity. Tag and ingredient associations are id sets: held
/// de-duplicated and sorted ascending so serialized output is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Option<i32>, // None for new recipes before persistence
    pub owner_id: i32,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub tags: Vec<i32>,
    pub ingredients: Vec<i32>,
}

impl Recipe {
    pub fn new(
        owner_id: i32,
        title: String,
        time_minutes: i32,
        price: f64,
        tags: Vec<i32>,
        ingredients: Vec<i32>,
    ) -> Self {
        Self {
            id: None,
            owner_id,
            title,
            time_minutes,
            price,
            tags: normalize_ids(tags),
            ingredients: normalize_ids(ingredients),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: i32,
        owner_id: i32,
        title: String,
        time_minutes: i32,
        price: f64,
        tags: Vec<i32>,
        ingredients: Vec<i32>,
    ) -> Self {
        Self {
            id: Some(id),
            owner_id,
            title,
            time_minutes,
            price,
            tags: normalize_ids(tags),
            ingredients: normalize_ids(ingredients),
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.title.trim().is_empty() {
            errors.push("title", "title cannot be blank");
        }
        if self.time_minutes < 0 {
            errors.push("time_minutes", "time_minutes cannot be negative");
        }
        if self.price < 0.0 {
            errors.push("price", "price cannot be negative");
        }

        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.field_errors().into_result()
    }
}

fn normalize_ids(mut ids: Vec<i32>) -> Vec<i32> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Detail form of a recipe: associations expanded to full objects instead
/// of bare ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe() -> Recipe {
        Recipe::new(1, "Curry".into(), 20, 7.0, vec![], vec![])
    }

    #[test]
    fn valid_recipe_passes_validation() {
        assert!(sample_recipe().validate().is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        let recipe = Recipe::new(1, "  ".into(), 20, 7.0, vec![], vec![]);
        match recipe.validate() {
            Err(DomainError::Validation(errors)) => assert_eq!(errors.0[0].field, "title"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_numeric_fields_are_each_reported() {
        let recipe = Recipe::new(1, "Curry".into(), -1, -0.5, vec![], vec![]);
        let errors = recipe.field_errors();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["time_minutes", "price"]);
    }

    #[test]
    fn association_ids_are_deduplicated_and_sorted() {
        let recipe = Recipe::new(1, "Curry".into(), 20, 7.0, vec![3, 1, 3, 2], vec![5, 5]);
        assert_eq!(recipe.tags, vec![1, 2, 3]);
        assert_eq!(recipe.ingredients, vec![5]);
    }

    #[test]
    fn zero_time_and_price_are_allowed() {
        let recipe = Recipe::new(1, "Water".into(), 0, 0.0, vec![], vec![]);
        assert!(recipe.validate().is_ok());
    }
}
