use uuid::Uuid;

/// Opaque bearer token tying a request back to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub id: Option<i32>,
    pub user_id: i32,
    pub token: String,
}

impl AuthToken {
    /// Issues a fresh token for the given user.
    pub fn issue(user_id: i32) -> Self {
        Self {
            id: None,
            user_id,
            token: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn with_id(id: i32, user_id: i32, token: String) -> Self {
        Self {
            id: Some(id),
            user_id,
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_are_unique() {
        let a = AuthToken::issue(1);
        let b = AuthToken::issue(1);
        assert_ne!(a.token, b.token);
        assert!(!a.token.is_empty());
    }
}
