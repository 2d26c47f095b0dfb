//! Movie API trait and implementations.

pub mod http;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Movie, MovieId, MoviePage, RecommendationResult};

pub use http::HttpMovieApi;

/// Boxed future returned by every [`MovieApi`] call.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Failure talking to the movie backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, timeout...
    #[error("request to {path} failed: {message}")]
    Transport { path: String, message: String },
    /// The server answered with a non-success status.
    #[error("{path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    /// The body could not be read or decoded.
    #[error("invalid response from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Parameters for one `GET /movies` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub skip: u64,
    pub limit: u32,
    pub year: Option<u16>,
    pub search: Option<String>,
}

impl MovieQuery {
    /// Query for a 1-based page of `page_size` movies.
    pub fn page(page: u32, page_size: u32) -> Self {
        Self {
            skip: u64::from(page.max(1) - 1) * u64::from(page_size),
            limit: page_size,
            year: None,
            search: None,
        }
    }

    /// Path plus query string, e.g. `/movies?skip=16&limit=16&search=star%20wars`.
    pub fn to_path(&self) -> String {
        let mut path = format!("/movies?skip={}&limit={}", self.skip, self.limit);
        if let Some(year) = self.year {
            path.push_str(&format!("&year={}", year));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            path.push_str(&format!("&search={}", urlencoding::encode(search)));
        }
        path
    }
}

/// Body of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub known_movies: Vec<MovieId>,
    pub top_k: u32,
}

/// Response of `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<RecommendationResult>,
}

/// The four backend endpoints the client consumes.
pub trait MovieApi: Send + Sync {
    /// `GET /movies?skip=&limit=&year=&search=`
    fn list_movies<'a>(&'a self, query: &'a MovieQuery) -> ApiFuture<'a, MoviePage>;

    /// `GET /movies/{id}`
    fn get_movie(&self, id: MovieId) -> ApiFuture<'_, Movie>;

    /// `GET /movies/{id}/poster`, raw image bytes.
    fn get_poster(&self, id: MovieId) -> ApiFuture<'_, Vec<u8>>;

    /// `POST /recommend`
    fn recommend<'a>(&'a self, request: &'a RecommendRequest) -> ApiFuture<'a, RecommendResponse>;
}
