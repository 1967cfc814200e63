use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, FieldErrors};

/// An ingredient a user keeps in their pantry list. Ownership rules match
/// `Tag`: exactly one owner, no cross-user name uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Option<i32>,
    pub owner_id: i32,
    pub name: String,
}

impl Ingredient {
    pub fn new(owner_id: i32, name: String) -> Self {
        Self {
            id: None,
            owner_id,
            name,
        }
    }

    pub fn with_id(id: i32, owner_id: i32, name: String) -> Self {
        Self {
            id: Some(id),
            owner_id,
            name,
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.name.trim().is_empty() {
            errors.push("name", "name cannot be blank");
        }
        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.field_errors().into_result()
    }
}
