//! Catalog facade unifying the remote metadata service and the built-in
//! sample set.
//!
//! Every view asks the remote first. A failed or empty remote answer is
//! substituted with sample data and tagged [`CatalogSource::Fallback`] so
//! callers can observe the substitution without a process-global flag.

pub mod fallback;
pub mod tmdb;

pub use tmdb::{image_url, CatalogError, TmdbClient};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::warn;

/// A single catalog item, as served by the remote service or the sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub backdrop_path: Option<String>,
    pub poster_path: Option<String>,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
}

impl Movie {
    /// Rating for display, one decimal place or "N/A" when unknown.
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(rating) => format!("{:.1}", rating),
            None => "N/A".to_string(),
        }
    }

    /// Release year for display, empty when unknown.
    pub fn release_year(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .unwrap_or("")
            .to_string()
    }
}

/// Where a response's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Remote,
    Fallback,
}

/// An ordered sequence of movies tagged with its source.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogList {
    pub source: CatalogSource,
    pub results: Vec<Movie>,
}

/// A single movie tagged with its source.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub source: CatalogSource,
    pub movie: Movie,
}

/// Remote reachability, as reported by a live probe.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub online: bool,
    pub source: CatalogSource,
}

/// The remote metadata service, seen as read-only views.
#[async_trait]
pub trait RemoteCatalog: Send + Sync {
    async fn popular(&self, page: u32) -> Result<Vec<Movie>, CatalogError>;
    async fn trending(&self) -> Result<Vec<Movie>, CatalogError>;
    async fn top_rated(&self) -> Result<Vec<Movie>, CatalogError>;
    async fn now_playing(&self, page: u32) -> Result<Vec<Movie>, CatalogError>;
    async fn search(&self, query: &str) -> Result<Vec<Movie>, CatalogError>;
    async fn details(&self, id: i64) -> Result<Movie, CatalogError>;
}

/// Facade over the remote catalog with fallback substitution.
///
/// Holds no mutable state; results are never cached between calls.
#[derive(Clone)]
pub struct CatalogService {
    remote: Arc<dyn RemoteCatalog>,
}

impl CatalogService {
    pub fn new(remote: Arc<dyn RemoteCatalog>) -> Self {
        Self { remote }
    }

    /// Apply the substitution policy: a remote success with results is
    /// returned verbatim; anything else is replaced by the sample set.
    fn substitute(
        view: &str,
        outcome: Result<Vec<Movie>, CatalogError>,
        fallback: impl FnOnce() -> Vec<Movie>,
    ) -> CatalogList {
        match outcome {
            Ok(results) if !results.is_empty() => CatalogList {
                source: CatalogSource::Remote,
                results,
            },
            Ok(_) => {
                warn!("Remote catalog returned no results for {}, using sample data", view);
                CatalogList {
                    source: CatalogSource::Fallback,
                    results: fallback(),
                }
            }
            Err(err) => {
                warn!("Remote catalog unavailable for {}: {}, using sample data", view, err);
                CatalogList {
                    source: CatalogSource::Fallback,
                    results: fallback(),
                }
            }
        }
    }

    pub async fn popular(&self, page: u32) -> CatalogList {
        Self::substitute("popular", self.remote.popular(page).await, shuffled_samples)
    }

    pub async fn trending(&self) -> CatalogList {
        Self::substitute("trending", self.remote.trending().await, shuffled_samples)
    }

    pub async fn top_rated(&self) -> CatalogList {
        Self::substitute("top rated", self.remote.top_rated().await, || {
            let mut movies = fallback::sample_movies();
            movies.sort_by(|a, b| {
                b.vote_average
                    .partial_cmp(&a.vote_average)
                    .unwrap_or(Ordering::Equal)
            });
            movies
        })
    }

    pub async fn now_playing(&self, page: u32) -> CatalogList {
        Self::substitute(
            "now playing",
            self.remote.now_playing(page).await,
            fallback::sample_movies,
        )
    }

    /// Over the fallback set, search is a case-insensitive substring match
    /// against title and overview rather than the full set.
    pub async fn search(&self, query: &str) -> CatalogList {
        Self::substitute("search", self.remote.search(query).await, || {
            fallback::search_sample_movies(query)
        })
    }

    pub async fn details(&self, id: i64) -> MovieDetail {
        match self.remote.details(id).await {
            Ok(movie) => MovieDetail {
                source: CatalogSource::Remote,
                movie,
            },
            Err(err) => {
                warn!("Remote catalog unavailable for movie {}: {}, using sample data", id, err);
                MovieDetail {
                    source: CatalogSource::Fallback,
                    movie: fallback::sample_movie_by_id(id),
                }
            }
        }
    }

    /// Probe the remote with a primary fetch and report reachability.
    pub async fn status(&self) -> CatalogStatus {
        match self.remote.popular(1).await {
            Ok(results) if !results.is_empty() => CatalogStatus {
                online: true,
                source: CatalogSource::Remote,
            },
            _ => CatalogStatus {
                online: false,
                source: CatalogSource::Fallback,
            },
        }
    }
}

fn shuffled_samples() -> Vec<Movie> {
    let mut movies = fallback::sample_movies();
    movies.shuffle(&mut rand::rng());
    movies
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Remote stub where every view fails, each with a different fault.
    struct DownRemote;

    #[async_trait]
    impl RemoteCatalog for DownRemote {
        async fn popular(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
            Err(CatalogError::Timeout)
        }
        async fn trending(&self) -> Result<Vec<Movie>, CatalogError> {
            Err(CatalogError::Network("connection refused".to_string()))
        }
        async fn top_rated(&self) -> Result<Vec<Movie>, CatalogError> {
            Err(CatalogError::Status(reqwest::StatusCode::BAD_GATEWAY))
        }
        async fn now_playing(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
            Err(CatalogError::Timeout)
        }
        async fn search(&self, _query: &str) -> Result<Vec<Movie>, CatalogError> {
            Err(CatalogError::Schema("missing field `results`".to_string()))
        }
        async fn details(&self, _id: i64) -> Result<Movie, CatalogError> {
            Err(CatalogError::Timeout)
        }
    }

    /// Remote stub serving a fixed answer.
    struct FixedRemote(Vec<Movie>);

    #[async_trait]
    impl RemoteCatalog for FixedRemote {
        async fn popular(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
            Ok(self.0.clone())
        }
        async fn trending(&self) -> Result<Vec<Movie>, CatalogError> {
            Ok(self.0.clone())
        }
        async fn top_rated(&self) -> Result<Vec<Movie>, CatalogError> {
            Ok(self.0.clone())
        }
        async fn now_playing(&self, _page: u32) -> Result<Vec<Movie>, CatalogError> {
            Ok(self.0.clone())
        }
        async fn search(&self, _query: &str) -> Result<Vec<Movie>, CatalogError> {
            Ok(self.0.clone())
        }
        async fn details(&self, _id: i64) -> Result<Movie, CatalogError> {
            Ok(self.0[0].clone())
        }
    }

    fn remote_movie(id: i64, title: &str, rating: f64) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            backdrop_path: None,
            poster_path: None,
            vote_average: Some(rating),
            release_date: None,
        }
    }

    fn ids(movies: &[Movie]) -> Vec<i64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[tokio::test]
    async fn popular_failure_substitutes_exact_sample_set() {
        let facade = CatalogService::new(Arc::new(DownRemote));
        let list = facade.popular(1).await;

        assert_eq!(list.source, CatalogSource::Fallback);
        assert_eq!(list.results.len(), 8);
        // shuffle is presentation only; the identifiers are the fixture's
        let mut got = ids(&list.results);
        got.sort_unstable();
        let mut want = ids(&fallback::sample_movies());
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn remote_success_is_returned_verbatim() {
        let movies = vec![
            remote_movie(1, "First", 5.0),
            remote_movie(2, "Second", 6.0),
            remote_movie(3, "Third", 7.0),
        ];
        let facade = CatalogService::new(Arc::new(FixedRemote(movies.clone())));
        let list = facade.popular(1).await;

        assert_eq!(list.source, CatalogSource::Remote);
        assert_eq!(list.results, movies);
    }

    #[tokio::test]
    async fn empty_remote_answer_counts_as_failure() {
        let facade = CatalogService::new(Arc::new(FixedRemote(vec![])));
        let list = facade.now_playing(1).await;

        assert_eq!(list.source, CatalogSource::Fallback);
        assert_eq!(ids(&list.results), ids(&fallback::sample_movies()));
    }

    #[tokio::test]
    async fn top_rated_fallback_is_sorted_by_rating_descending() {
        let facade = CatalogService::new(Arc::new(DownRemote));
        let list = facade.top_rated().await;

        assert_eq!(list.source, CatalogSource::Fallback);
        let ratings: Vec<f64> = list.results.iter().filter_map(|m| m.vote_average).collect();
        assert!(ratings.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(list.results[0].title, "The Shawshank Redemption");
    }

    #[tokio::test]
    async fn search_fallback_filters_instead_of_returning_everything() {
        let facade = CatalogService::new(Arc::new(DownRemote));

        let hits = facade.search("fight").await;
        assert_eq!(hits.source, CatalogSource::Fallback);
        assert_eq!(hits.results.len(), 1);
        assert_eq!(hits.results[0].title, "Fight Club");

        let misses = facade.search("zzzznomatch").await;
        assert_eq!(misses.source, CatalogSource::Fallback);
        assert!(misses.results.is_empty());
    }

    #[tokio::test]
    async fn empty_search_query_returns_full_sample_set() {
        let facade = CatalogService::new(Arc::new(DownRemote));
        let list = facade.search("").await;

        assert_eq!(list.source, CatalogSource::Fallback);
        assert_eq!(list.results.len(), 8);
    }

    #[tokio::test]
    async fn details_fall_back_to_matching_sample() {
        let facade = CatalogService::new(Arc::new(DownRemote));
        let detail = facade.details(680).await;

        assert_eq!(detail.source, CatalogSource::Fallback);
        assert_eq!(detail.movie.title, "Pulp Fiction");
    }

    #[tokio::test]
    async fn status_reflects_remote_reachability() {
        let down = CatalogService::new(Arc::new(DownRemote));
        assert!(!down.status().await.online);

        let up = CatalogService::new(Arc::new(FixedRemote(vec![remote_movie(1, "Up", 7.0)])));
        assert!(up.status().await.online);
    }

    #[test]
    fn rating_and_year_degrade_to_placeholders() {
        let movie = remote_movie(1, "Rated", 8.76);
        assert_eq!(movie.rating_label(), "8.8");

        let blank = Movie {
            vote_average: None,
            release_date: None,
            ..movie
        };
        assert_eq!(blank.rating_label(), "N/A");
        assert_eq!(blank.release_year(), "");

        let dated = Movie {
            release_date: Some("1999-10-15".to_string()),
            ..blank
        };
        assert_eq!(dated.release_year(), "1999");
    }
}
