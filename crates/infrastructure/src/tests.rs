//! Tests for the SQLite adapters against throwaway database files. A shared
//! file (not `:memory:`) is required because every pooled connection opens
//! its own private in-memory database.

use crate::database::{recipe_ingredients, recipe_tags, users, Database};
use crate::repositories::{
    SqliteIngredientRepository, SqliteRecipeRepository, SqliteTagRepository,
    SqliteTokenRepository, SqliteUserRepository,
};
use diesel::prelude::*;
use domain::{
    AuthToken, DomainError, Ingredient, IngredientRepository, Recipe, RecipeRepository, Tag,
    TagRepository, TokenRepository, User, UserRepository,
};
use std::path::PathBuf;
use std::sync::Arc;

struct TempDatabase {
    database: Database,
    path: PathBuf,
}

impl TempDatabase {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "recipe_api_{name}_{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let database =
            Database::new(path.to_str().expect("temp path is utf-8")).expect("database setup");
        Self { database, path }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

async fn create_user(repository: &SqliteUserRepository, email: &str) -> User {
    repository
        .save(&User::new(
            email.to_string(),
            "Test".to_string(),
            "hash".to_string(),
        ))
        .await
        .expect("user saved")
}

#[tokio::test]
async fn concurrent_tag_saves_each_return_their_own_row() {
    let db = TempDatabase::new("concurrent_tags");
    let users_repo = SqliteUserRepository::new(db.database.get_pool());
    let tags_repo = Arc::new(SqliteTagRepository::new(db.database.get_pool()));

    let mut owner_ids = Vec::new();
    for n in 0..4 {
        let user = create_user(&users_repo, &format!("owner{n}@example.com")).await;
        owner_ids.push(user.id.expect("persisted id"));
    }

    let mut handles = Vec::new();
    for owner_id in owner_ids {
        let tags_repo = tags_repo.clone();
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for n in 0..10 {
                let name = format!("tag-{owner_id}-{n}");
                let saved = tags_repo
                    .save(&Tag::new(owner_id, name.clone()))
                    .await
                    .expect("tag saved");
                // The readback must be this caller's insert, not whichever
                // row happened to land last.
                assert_eq!(saved.owner_id, owner_id);
                assert_eq!(saved.name, name);
                ids.push(saved.id.expect("persisted id"));
            }
            ids
        }));
    }

    let mut all_ids = Vec::new();
    for handle in handles {
        all_ids.extend(handle.await.expect("task finished"));
    }
    all_ids.sort_unstable();
    all_ids.dedup();
    assert_eq!(all_ids.len(), 40);
}

#[tokio::test]
async fn concurrent_token_saves_each_return_their_own_row() {
    let db = TempDatabase::new("concurrent_tokens");
    let users_repo = SqliteUserRepository::new(db.database.get_pool());
    let tokens_repo = Arc::new(SqliteTokenRepository::new(db.database.get_pool()));

    let mut handles = Vec::new();
    for n in 0..4 {
        let user = create_user(&users_repo, &format!("token{n}@example.com")).await;
        let user_id = user.id.expect("persisted id");
        let tokens_repo = tokens_repo.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..10 {
                let issued = AuthToken::issue(user_id);
                let saved = tokens_repo.save(&issued).await.expect("token saved");
                assert_eq!(saved.user_id, user_id);
                assert_eq!(saved.token, issued.token);
            }
        }));
    }
    for handle in handles {
        handle.await.expect("task finished");
    }
}

#[tokio::test]
async fn deleting_a_user_cascades_to_owned_rows() {
    let db = TempDatabase::new("cascade");
    let pool = db.database.get_pool();
    let users_repo = SqliteUserRepository::new(pool.clone());
    let tags_repo = SqliteTagRepository::new(pool.clone());
    let ingredients_repo = SqliteIngredientRepository::new(pool.clone());
    let recipes_repo = SqliteRecipeRepository::new(pool.clone());
    let tokens_repo = SqliteTokenRepository::new(pool.clone());

    let user = create_user(&users_repo, "leaving@example.com").await;
    let owner_id = user.id.expect("persisted id");

    let tag = tags_repo
        .save(&Tag::new(owner_id, "Vegan".to_string()))
        .await
        .expect("tag saved");
    let ingredient = ingredients_repo
        .save(&Ingredient::new(owner_id, "Cumin".to_string()))
        .await
        .expect("ingredient saved");
    let token = tokens_repo
        .save(&AuthToken::issue(owner_id))
        .await
        .expect("token saved");
    recipes_repo
        .save(&Recipe::new(
            owner_id,
            "Curry".to_string(),
            20,
            7.0,
            vec![tag.id.expect("tag id")],
            vec![ingredient.id.expect("ingredient id")],
        ))
        .await
        .expect("recipe saved");

    let mut conn = pool.get().expect("connection");
    tokio::task::spawn_blocking(move || {
        diesel::delete(users::table.filter(users::id.eq(owner_id))).execute(&mut conn)
    })
    .await
    .expect("task finished")
    .expect("user deleted");

    assert!(tags_repo
        .find_for_owner(owner_id)
        .await
        .expect("tags listed")
        .is_empty());
    assert!(ingredients_repo
        .find_for_owner(owner_id)
        .await
        .expect("ingredients listed")
        .is_empty());
    assert!(recipes_repo
        .find_for_owner(owner_id)
        .await
        .expect("recipes listed")
        .is_empty());
    assert!(tokens_repo
        .find_user_id(&token.token)
        .await
        .expect("token lookup")
        .is_none());

    let mut conn = pool.get().expect("connection");
    let association_rows: i64 = tokio::task::spawn_blocking(move || {
        let tag_rows: i64 = recipe_tags::table.count().get_result(&mut conn)?;
        let ingredient_rows: i64 = recipe_ingredients::table.count().get_result(&mut conn)?;
        Ok::<_, diesel::result::Error>(tag_rows + ingredient_rows)
    })
    .await
    .expect("task finished")
    .expect("counts loaded");
    assert_eq!(association_rows, 0);
}

#[tokio::test]
async fn duplicate_email_insert_surfaces_as_email_field_error() {
    let db = TempDatabase::new("duplicate_email");
    let users_repo = SqliteUserRepository::new(db.database.get_pool());

    create_user(&users_repo, "taken@example.com").await;
    let err = users_repo
        .save(&User::new(
            "taken@example.com".to_string(),
            "Other".to_string(),
            "hash".to_string(),
        ))
        .await
        .expect_err("duplicate email rejected");

    match err {
        DomainError::Validation(errors) => {
            assert_eq!(errors.0.len(), 1);
            assert_eq!(errors.0[0].field, "email");
            assert_eq!(errors.0[0].message, "a user with this email already exists");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
