//! Catalog view endpoints.
//!
//! These routes are public: access gating is the client's concern. Remote
//! faults never produce error responses here; the facade substitutes the
//! sample catalog and tags the response with its source.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{image_url, CatalogList, CatalogSource, CatalogStatus, Movie};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::{validate_page, validate_query};

const POSTER_WIDTH: &str = "w500";
const BACKDROP_WIDTH: &str = "w1280";

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// A movie plus ready-to-render image URLs and display strings.
/// Fields the UI depends on never come through as null here.
#[derive(Debug, Serialize)]
pub struct MovieView {
    #[serde(flatten)]
    pub movie: Movie,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub rating_label: String,
    pub release_year: String,
}

#[derive(Debug, Serialize)]
pub struct MovieListBody {
    pub source: CatalogSource,
    pub results: Vec<MovieView>,
}

#[derive(Debug, Serialize)]
pub struct MovieDetailBody {
    pub source: CatalogSource,
    pub movie: MovieView,
}

fn movie_view(image_base: &str, movie: Movie) -> MovieView {
    let poster_url = image_url(image_base, movie.poster_path.as_deref(), POSTER_WIDTH);
    let backdrop_url = image_url(image_base, movie.backdrop_path.as_deref(), BACKDROP_WIDTH);
    let rating_label = movie.rating_label();
    let release_year = movie.release_year();
    MovieView {
        movie,
        poster_url,
        backdrop_url,
        rating_label,
        release_year,
    }
}

fn list_body(image_base: &str, list: CatalogList) -> MovieListBody {
    MovieListBody {
        source: list.source,
        results: list
            .results
            .into_iter()
            .map(|movie| movie_view(image_base, movie))
            .collect(),
    }
}

fn check_page(page: u32) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_page(page) {
        errors.add("page", e);
    }
    errors.finish()
}

pub async fn popular(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListBody>, ApiError> {
    check_page(params.page)?;
    let list = state.catalog.popular(params.page).await;
    Ok(Json(list_body(&state.config.tmdb.image_base_url, list)))
}

pub async fn trending(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MovieListBody>, ApiError> {
    let list = state.catalog.trending().await;
    Ok(Json(list_body(&state.config.tmdb.image_base_url, list)))
}

pub async fn top_rated(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MovieListBody>, ApiError> {
    let list = state.catalog.top_rated().await;
    Ok(Json(list_body(&state.config.tmdb.image_base_url, list)))
}

pub async fn now_playing(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Result<Json<MovieListBody>, ApiError> {
    check_page(params.page)?;
    let list = state.catalog.now_playing(params.page).await;
    Ok(Json(list_body(&state.config.tmdb.image_base_url, list)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<MovieListBody>, ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_query(&params.query) {
        errors.add("query", e);
    }
    errors.finish()?;

    let list = state.catalog.search(&params.query).await;
    Ok(Json(list_body(&state.config.tmdb.image_base_url, list)))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MovieDetailBody>, ApiError> {
    let detail = state.catalog.details(id).await;
    Ok(Json(MovieDetailBody {
        source: detail.source,
        movie: movie_view(&state.config.tmdb.image_base_url, detail.movie),
    }))
}

/// Probe the remote service. Never an error; offline just means the
/// catalog is serving sample data.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<CatalogStatus> {
    Json(state.catalog.status().await)
}
