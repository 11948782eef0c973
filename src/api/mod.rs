pub mod auth;
mod error;
mod movies;
mod validation;

pub use error::{ApiError, ErrorCode};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes (public, stateless)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Catalog routes (public; the client gates access with its session flag)
    let movie_routes = Router::new()
        .route("/popular", get(movies::popular))
        .route("/trending", get(movies::trending))
        .route("/top-rated", get(movies::top_rated))
        .route("/now-playing", get(movies::now_playing))
        .route("/search", get(movies::search))
        .route("/status", get(movies::status))
        .route("/:id", get(movies::details));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes)
        .nest("/api/movies", movie_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
