//! Client for the TMDB movie metadata service.
//!
//! All calls are read-only GETs authenticated by a static `api_key` query
//! parameter, bound to a fixed timeout, and deserialized into typed structs.
//! A payload that does not match the expected shape is a [`CatalogError`]
//! like any network fault, so malformed records never reach callers.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::TmdbConfig;

use super::{Movie, RemoteCatalog};

/// Width variants TMDB serves for image assets. Unknown widths fall back
/// to "original", matching the service's own behavior.
const IMAGE_WIDTHS: [&str; 7] = ["original", "w1280", "w780", "w500", "w342", "w154", "w92"];

/// Faults from the remote catalog. These are absorbed by the facade's
/// fallback substitution and never surface as user-visible errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CatalogError::Timeout
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

/// A page of movie results as the remote service returns them.
#[derive(Debug, Deserialize)]
struct MovieListResponse {
    results: Vec<Movie>,
}

pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        })
    }

    /// Make an authenticated GET request and deserialize the response.
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Schema(e.to_string()))
    }

    async fn movie_list(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Movie>, CatalogError> {
        let response: MovieListResponse = self.get(path, params).await?;
        Ok(response.results)
    }
}

#[async_trait]
impl RemoteCatalog for TmdbClient {
    async fn popular(&self, page: u32) -> Result<Vec<Movie>, CatalogError> {
        self.movie_list("/movie/popular", &[("page", page.to_string())])
            .await
    }

    async fn trending(&self) -> Result<Vec<Movie>, CatalogError> {
        self.movie_list("/trending/movie/day", &[]).await
    }

    async fn top_rated(&self) -> Result<Vec<Movie>, CatalogError> {
        self.movie_list("/movie/top_rated", &[]).await
    }

    async fn now_playing(&self, page: u32) -> Result<Vec<Movie>, CatalogError> {
        self.movie_list("/movie/now_playing", &[("page", page.to_string())])
            .await
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        self.movie_list("/search/movie", &[("query", query.to_string())])
            .await
    }

    async fn details(&self, id: i64) -> Result<Movie, CatalogError> {
        self.get(&format!("/movie/{}", id), &[]).await
    }
}

/// Compose a full image URL from a path reference and a width variant.
/// Absolute URLs pass through untouched; unknown widths use "original".
pub fn image_url(image_base: &str, path: Option<&str>, width: &str) -> Option<String> {
    let path = path?;
    if path.starts_with("http") {
        return Some(path.to_string());
    }

    let width = if IMAGE_WIDTHS.contains(&width) {
        width
    } else {
        "original"
    };
    Some(format!(
        "{}/{}{}",
        image_base.trim_end_matches('/'),
        width,
        path
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TmdbClient {
        TmdbClient::new(&TmdbConfig {
            api_key: "test_key".to_string(),
            base_url: server.uri(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 2,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn popular_sends_key_language_and_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/popular"))
            .and(query_param("api_key", "test_key"))
            .and(query_param("language", "en-US"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "results": [
                    {
                        "id": 550,
                        "title": "Fight Club",
                        "overview": "An insomniac office worker...",
                        "backdrop_path": "/back.jpg",
                        "poster_path": "/poster.jpg",
                        "vote_average": 8.8,
                        "release_date": "1999-10-15"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let movies = client_for(&server).popular(2).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 550);
        assert_eq!(movies[0].vote_average, Some(8.8));
    }

    #[tokio::test]
    async fn slow_response_is_a_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/now_playing"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = TmdbClient::new(&TmdbConfig {
            api_key: "test_key".to_string(),
            base_url: server.uri(),
            image_base_url: "https://image.tmdb.org/t/p".to_string(),
            language: "en-US".to_string(),
            timeout_secs: 1,
        })
        .unwrap();

        let err = client.now_playing(1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Timeout));
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/movie/top_rated"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).top_rated().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn mismatched_payload_fails_closed() {
        let server = MockServer::start().await;

        // 200 OK but not the expected shape
        Mock::given(method("GET"))
            .and(path("/trending/movie/day"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"unexpected": "shape"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).trending().await.unwrap_err();
        assert!(matches!(err, CatalogError::Schema(_)));
    }

    #[tokio::test]
    async fn nullable_fields_deserialize_as_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", "fight"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"id": 1, "title": "Untitled", "overview": "",
                     "backdrop_path": null, "poster_path": null,
                     "vote_average": null, "release_date": null}
                ]
            })))
            .mount(&server)
            .await;

        let movies = client_for(&server).search("fight").await.unwrap();
        assert_eq!(movies[0].vote_average, None);
        assert_eq!(movies[0].release_date, None);
    }

    #[test]
    fn image_url_composes_width_variant() {
        let url = image_url("https://image.tmdb.org/t/p", Some("/poster.jpg"), "w500");
        assert_eq!(url.as_deref(), Some("https://image.tmdb.org/t/p/w500/poster.jpg"));
    }

    #[test]
    fn image_url_passes_absolute_urls_through() {
        let absolute = "https://picsum.photos/500/750?random=1";
        let url = image_url("https://image.tmdb.org/t/p", Some(absolute), "w500");
        assert_eq!(url.as_deref(), Some(absolute));
    }

    #[test]
    fn image_url_unknown_width_uses_original() {
        let url = image_url("https://image.tmdb.org/t/p", Some("/x.jpg"), "w9999");
        assert_eq!(url.as_deref(), Some("https://image.tmdb.org/t/p/original/x.jpg"));
    }

    #[test]
    fn image_url_without_path_is_none() {
        assert_eq!(image_url("https://image.tmdb.org/t/p", None, "w500"), None);
    }
}
