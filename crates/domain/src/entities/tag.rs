use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, FieldErrors};

/// A label a user attaches to their recipes. Names are scoped per owner:
/// two users may each have a tag called "Vegan" and those are distinct rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Option<i32>,
    pub owner_id: i32,
    pub name: String,
}

impl Tag {
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
