use crate::database::{tags, SqlitePool};
use async_trait::async_trait;
use diesel::prelude::*;
use domain::{DomainError, Tag, TagRepository};

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct TagModel {
    id: i32,
    user_id: i32,
    name: String,
}

#[derive(Insertable)]
#[diesel(table_name = tags)]
struct NewTagModel {
    user_id: i32,
    name: String,
}

impl From<TagModel> for Tag {
    fn from(model: TagModel) -> Self {
        Tag::with_id(model.id, model.user_id, model.name)
    }
}

impl From<&Tag> for NewTagModel {
    fn from(tag: &Tag) -> Self {
        NewTagModel {
            user_id: tag.owner_id,
            name: tag.name.clone(),
        }
    }
}

pub struct SqliteTagRepository {
    pool: SqlitePool,
}

impl SqliteTagRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqliteTagRepository {
    async fn find_for_owner(&self, owner_id: i32) -> Result<Vec<Tag>, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let result = tokio::task::spawn_blocking(move || {
            tags::table
                .filter(tags::user_id.eq(owner_id))
                .order(tags::name.desc())
                .select(TagModel::as_select())
                .load::<TagModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn find_by_ids(&self, owner_id: i32, ids: &[i32]) -> Result<Vec<Tag>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let ids = ids.to_vec();
        let result = tokio::task::spawn_blocking(move || {
            tags::table
                .filter(tags::user_id.eq(owner_id))
                .filter(tags::id.eq_any(ids))
                .order(tags::id.asc())
                .select(TagModel::as_select())
                .load::<TagModel>(&mut conn)
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into_iter().map(|model| model.into()).collect())
    }

    async fn save(&self, tag: &Tag) -> Result<Tag, DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let new_tag = NewTagModel::from(tag);

        let result = tokio::task::spawn_blocking(move || {
            // Insert and readback share one transaction so the last-row
            // lookup cannot observe a concurrent insert.
            conn.transaction(|conn| {
                diesel::insert_into(tags::table)
                    .values(&new_tag)
                    .execute(conn)?;

                tags::table
                    .order(tags::id.desc())
                    .select(TagModel::as_select())
                    .first::<TagModel>(conn)
            })
        })
        .await
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?
        .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        Ok(result.into())
    }
}
