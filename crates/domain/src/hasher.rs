use crate::errors::DomainError;

/// Password hashing port. The domain never sees plaintext credentials past
/// registration/login; the concrete algorithm lives in infrastructure.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Returns `Ok(false)` for a wrong password; `Err` only when the stored
    /// hash itself cannot be processed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
