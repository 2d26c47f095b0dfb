//! In-memory [`MovieApi`] for tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use super::{ApiError, ApiFuture, MovieApi, MovieQuery, RecommendRequest, RecommendResponse};
use crate::{Movie, MovieId, MoviePage, RecommendationResult};

/// A hand-rolled mock implementing [`MovieApi`].
///
/// Supports:
/// - Canned movies, posters, catalog pages, and recommendations.
/// - Forced HTTP failures per endpoint.
/// - Optional per-call latency.
/// - A log of every requested path via [`calls()`](MockApi::calls).
#[derive(Default)]
pub struct MockApi {
    movies: HashMap<MovieId, Movie>,
    posters: HashMap<MovieId, Vec<u8>>,
    page: Option<MoviePage>,
    recommendations: Vec<RecommendationResult>,
    failing_movies: HashSet<MovieId>,
    fail_list_status: Option<u16>,
    fail_recommend_status: Option<u16>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    recommend_bodies: Mutex<Vec<RecommendRequest>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a movie served by `GET /movies/{id}`.
    pub fn with_movie(mut self, id: MovieId, title: &str) -> Self {
        self.movies.insert(
            id,
            Movie {
                id,
                title: title.to_string(),
                year: None,
                genres: None,
                imdb_id: None,
                tmdb_id: None,
            },
        );
        self
    }

    pub fn with_poster(mut self, id: MovieId, bytes: Vec<u8>) -> Self {
        self.posters.insert(id, bytes);
        self
    }

    /// Page returned by every `GET /movies` call.
    pub fn with_page(mut self, page: MoviePage) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_recommendations(mut self, recs: Vec<(MovieId, f64)>) -> Self {
        self.recommendations = recs
            .into_iter()
            .map(|(movie_id, score)| RecommendationResult { movie_id, score })
            .collect();
        self
    }

    /// `GET /movies/{id}` answers 500 for this id.
    pub fn failing_movie(mut self, id: MovieId) -> Self {
        self.failing_movies.insert(id);
        self
    }

    pub fn failing_list(mut self, status: u16) -> Self {
        self.fail_list_status = Some(status);
        self
    }

    pub fn failing_recommend(mut self, status: u16) -> Self {
        self.fail_recommend_status = Some(status);
        self
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Paths requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Bodies received by `POST /recommend`.
    pub fn recommend_bodies(&self) -> Vec<RecommendRequest> {
        self.recommend_bodies.lock().unwrap().clone()
    }

    fn record(&self, path: &str) {
        self.calls.lock().unwrap().push(path.to_string());
    }

    async fn latency(&self) {
        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }
    }
}

fn status(path: &str, status: u16) -> ApiError {
    ApiError::Status {
        path: path.to_string(),
        status,
    }
}

impl MovieApi for MockApi {
    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> ApiFuture<'a, MoviePage> {
        let path = query.to_path();
        self.record(&path);
        Box::pin(async move {
            self.latency().await;
            if let Some(code) = self.fail_list_status {
                return Err(status(&path, code));
            }
            Ok(self.page.clone().unwrap_or(MoviePage {
                movies: Vec::new(),
                total: 0,
                pages: 0,
            }))
        })
    }

    fn get_movie(&self, id: MovieId) -> ApiFuture<'_, Movie> {
        let path = format!("/movies/{}", id);
        self.record(&path);
        Box::pin(async move {
            self.latency().await;
            if self.failing_movies.contains(&id) {
                return Err(status(&path, 500));
            }
            self.movies.get(&id).cloned().ok_or_else(|| status(&path, 404))
        })
    }

    fn get_poster(&self, id: MovieId) -> ApiFuture<'_, Vec<u8>> {
        let path = format!("/movies/{}/poster", id);
        self.record(&path);
        Box::pin(async move {
            self.latency().await;
            self.posters.get(&id).cloned().ok_or_else(|| status(&path, 404))
        })
    }

    fn recommend<'a>(&'a self, request: &'a RecommendRequest) -> ApiFuture<'a, RecommendResponse> {
        self.record("/recommend");
        self.recommend_bodies.lock().unwrap().push(request.clone());
        Box::pin(async move {
            self.latency().await;
            if let Some(code) = self.fail_recommend_status {
                return Err(status("/recommend", code));
            }
            Ok(RecommendResponse {
                recommendations: self.recommendations.clone(),
            })
        })
    }
}
