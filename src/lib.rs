// Library exports for the api binary and tests
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::{CredentialStore, InMemoryCredentialStore, InMemoryPostStore, PostStore};
use services::token::TokenService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn CredentialStore>,
    pub posts: Arc<dyn PostStore>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    /// Fresh in-memory stores. Fails when the signing secret is unusable.
    pub fn from_config(config: &Config) -> Result<Self, error::AppError> {
        let tokens = TokenService::new(
            &config.jwt_secret,
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        )?;
        Ok(Self {
            users: Arc::new(InMemoryCredentialStore::new()),
            posts: Arc::new(InMemoryPostStore::new()),
            tokens: Arc::new(tokens),
        })
    }
}

/// Builds the full router. `prefix` is either empty or a `/segment` path.
pub fn app(state: AppState, prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Auth
        .route(&format!("{prefix}/register"), post(routes::auth::register))
        .route(&format!("{prefix}/login"), post(routes::auth::login))
        .route(&format!("{prefix}/refresh-token"), post(routes::auth::refresh_token))
        // Posts
        .route(
            &format!("{prefix}/posts"),
            get(routes::posts::latest_post).post(routes::posts::create_post),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .with_state(state)
}
