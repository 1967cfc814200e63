use crate::entities::Tag;
use crate::errors::DomainError;
use crate::repositories::TagRepository;
use std::sync::Arc;

pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Tags owned by the caller, name descending.
    pub async fn list_tags(&self, owner_id: i32) -> Result<Vec<Tag>, DomainError> {
        self.tags.find_for_owner(owner_id).await
    }

    pub async fn create_tag(&self, owner_id: i32, name: String) -> Result<Tag, DomainError> {
        let tag = Tag::new(owner_id, name);
        tag.validate()?;
        self.tags.save(&tag).await
    }
}
