use axum::extract::{FromRequest, Request};
use axum::Json;
use domain::{AuthToken, Ingredient, Recipe, RecipeDetail, Tag, User};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// Wire representations. Requests carry no owner field at all: ownership is
// always taken from the authenticated caller, so a forged owner in the
// payload has nothing to bind to.

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub email: String,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        // password_hash deliberately never leaves the server
        Self {
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenDto {
    pub token: String,
}

impl From<AuthToken> for TokenDto {
    fn from(token: AuthToken) -> Self {
        Self { token: token.token }
    }
}

#[derive(Debug, Serialize)]
pub struct TagDto {
    pub id: Option<i32>,
    pub name: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientDto {
    pub id: Option<i32>,
    pub name: String,
}

impl From<Ingredient> for IngredientDto {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// Summary form: associations as bare id lists.
#[derive(Debug, Serialize)]
pub struct RecipeDto {
    pub id: Option<i32>,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub tags: Vec<i32>,
    pub ingredients: Vec<i32>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
        }
    }
}

/// Detail form: associations expanded to nested summaries.
#[derive(Debug, Serialize)]
pub struct RecipeDetailDto {
    pub id: Option<i32>,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub tags: Vec<TagDto>,
    pub ingredients: Vec<IngredientDto>,
}

impl From<RecipeDetail> for RecipeDetailDto {
    fn from(detail: RecipeDetail) -> Self {
        Self {
            id: detail.recipe.id,
            title: detail.recipe.title,
            time_minutes: detail.recipe.time_minutes,
            price: detail.recipe.price,
            tags: detail.tags.into_iter().map(Into::into).collect(),
            ingredients: detail.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateIngredientRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    #[serde(default)]
    pub tags: Vec<i32>,
    #[serde(default)]
    pub ingredients: Vec<i32>,
}

/// `Json` wrapper whose rejection maps to the API's 400 contract instead of
/// axum's default 422.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(ApiJson(value))
    }
}
