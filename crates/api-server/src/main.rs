use anyhow::Result;
use application::RecipeApp;
use std::sync::Arc;
use tracing::info;

mod auth;
mod config;
mod dto;
mod error;
mod routes;

use config::Config;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("api_server=debug,tower_http=debug")
        .init();

    info!("starting recipe API server");

    // Load configuration from environment
    let config = Config::from_env();

    info!("using database: {}", config.database_path);
    info!(
        "API server will bind to: {}:{}",
        config.api_host, config.api_port
    );

    // Wire repositories and services over the configured database
    let recipe_app = RecipeApp::new(&config.database_path)?;
    let state = AppState {
        app: Arc::new(recipe_app),
    };

    let router = routes::app(state);

    // Run the server
    let bind_address = format!("{}:{}", config.api_host, config.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("API server listening on http://{}", bind_address);
    info!("   POST /users          - Create account");
    info!("   POST /users/token    - Obtain bearer token");
    info!("   GET  /users/me       - Authenticated profile");
    info!("   GET  /tags           - List tags");
    info!("   POST /tags           - Create tag");
    info!("   GET  /ingredients    - List ingredients");
    info!("   POST /ingredients    - Create ingredient");
    info!("   GET  /recipes        - List recipes");
    info!("   POST /recipes        - Create recipe");
    info!("   GET  /recipes/:id    - Recipe detail");
    info!("   GET  /health         - Health check");

    axum::serve(listener, router).await?;

    Ok(())
}
