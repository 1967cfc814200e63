use crate::entities::Tag;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Every read is owner-scoped: rows belonging to other users are invisible
/// through this port.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Tags owned by `owner_id`, sorted by name descending.
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Tag>, DomainError>;

    /// The subset of `ids` that exist and belong to `owner_id`, sorted by id
    /// ascending. Foreign or unknown ids are simply absent from the result.
    async fn find_by_ids(&self, owner_id: i32, ids: &[i32]) -> Result<Vec<Tag>, DomainError>;

    async fn save(&self, tag: &Tag) -> Result<Tag, DomainError>;
}
