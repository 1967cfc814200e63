use crate::errors::{DomainError, FieldErrors};

/// Core User entity - owns every tag, ingredient and recipe it creates.
/// The email is the natural key; the password is only ever held hashed.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i32>, // None for new users before persistence
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

impl User {
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        Self {
            id: None,
            email,
            name,
            password_hash,
        }
    }

    pub fn with_id(id: i32, email: String, name: String, password_hash: String) -> Self {
        Self {
            id: Some(id),
            email,
            name,
            password_hash,
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.email.trim().is_empty() {
            errors.push("email", "email cannot be blank");
        } else if !self.email.contains('@') {
            errors.push("email", "invalid email format");
        }

        if self.name.trim().is_empty() {
            errors.push("name", "name cannot be blank");
        }

        errors
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.field_errors().into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_user_passes_validation() {
        let user = User::new("cook@example.com".into(), "Cook".into(), "hash".into());
        assert!(user.validate().is_ok());
    }

    #[test]
    fn blank_email_and_name_are_both_reported() {
        let user = User::new("  ".into(), "".into(), "hash".into());
        let errors = user.field_errors();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name"]);
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let user = User::new("not-an-email".into(), "Cook".into(), "hash".into());
        assert!(user.validate().is_err());
    }
}
