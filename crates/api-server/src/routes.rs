use application::RecipeApp;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::AuthUser;
use crate::dto::{
    ApiJson, CreateIngredientRequest, CreateRecipeRequest, CreateTagRequest, CreateTokenRequest,
    CreateUserRequest, IngredientDto, RecipeDetailDto, RecipeDto, TagDto, TokenDto, UserDto,
};
use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<RecipeApp>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Account endpoints (no auth)
        .route("/users", post(create_user))
        .route("/users/token", post(create_token))
        // Caller profile (bearer auth via the AuthUser extractor)
        .route("/users/me", get(me))
        // Owner-scoped resource endpoints
        .route("/tags", get(list_tags).post(create_tag))
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/:id", get(get_recipe))
        // Health check
        .route("/health", get(health_check))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Handler functions

async fn create_user(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .app
        .users
        .register(payload.email, payload.password, payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

async fn create_token(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state
        .app
        .users
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(TokenDto::from(token)))
}

async fn me(auth: AuthUser) -> impl IntoResponse {
    Json(UserDto::from(auth.user))
}

async fn list_tags(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let tags = state.app.tags.list_tags(auth.id).await?;
    let tags: Vec<TagDto> = tags.into_iter().map(Into::into).collect();
    Ok(Json(tags))
}

async fn create_tag(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateTagRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tag = state.app.tags.create_tag(auth.id, payload.name).await?;
    Ok((StatusCode::CREATED, Json(TagDto::from(tag))))
}

async fn list_ingredients(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let ingredients = state.app.ingredients.list_ingredients(auth.id).await?;
    let ingredients: Vec<IngredientDto> = ingredients.into_iter().map(Into::into).collect();
    Ok(Json(ingredients))
}

async fn create_ingredient(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateIngredientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ingredient = state
        .app
        .ingredients
        .create_ingredient(auth.id, payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(IngredientDto::from(ingredient))))
}

async fn list_recipes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let recipes = state.app.recipes.list_recipes(auth.id).await?;
    let recipes: Vec<RecipeDto> = recipes.into_iter().map(Into::into).collect();
    Ok(Json(recipes))
}

async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateRecipeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let recipe = state
        .app
        .recipes
        .create_recipe(
            auth.id,
            payload.title,
            payload.time_minutes,
            payload.price,
            payload.tags,
            payload.ingredients,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RecipeDto::from(recipe))))
}

async fn get_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.app.recipes.get_recipe_detail(auth.id, id).await?;
    Ok(Json(RecipeDetailDto::from(detail)))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}
