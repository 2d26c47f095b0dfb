//! The recommendation workflow: resolve the known movies, ask the backend for
//! recommendations, and resolve the recommended movies.

use futures_util::future::try_join_all;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, MovieApi, RecommendRequest};
use crate::nav::parse_movie_ids;
use crate::{Movie, MovieId};

/// `top_k` sent with every recommendation request unless configured otherwise.
pub const DEFAULT_TOP_K: u32 = 5;

/// Terminal failure of a recommendation run. The `Display` text is what the
/// user sees.
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("No movies selected")]
    NoMoviesSelected,
    #[error("Invalid movie id: {0}")]
    InvalidMovieId(String),
    #[error("Failed to fetch movie {id}")]
    MovieDetails {
        id: MovieId,
        #[source]
        source: ApiError,
    },
    #[error("Failed to get recommendations")]
    Recommend(#[source] ApiError),
}

/// A movie merged with the score the backend gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedMovie {
    pub movie: Movie,
    pub score: f64,
}

impl RecommendedMovie {
    /// Score as a whole percentage, e.g. `87%`.
    pub fn badge(&self) -> String {
        format!("{}%", (self.score * 100.0).round() as i64)
    }
}

/// Result of a successful run: the recommended movies in backend order, and
/// the movies the request was seeded with in selection order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recommendations {
    pub recommended: Vec<RecommendedMovie>,
    pub selected: Vec<Movie>,
}

/// Run the workflow for the raw `movies` route parameter.
///
/// Fails with [`RecommendError::NoMoviesSelected`] before any network call
/// when the parameter holds no ids.
pub async fn recommend_for_route(
    api: &dyn MovieApi,
    movies: Option<&str>,
    top_k: u32,
) -> Result<Recommendations, RecommendError> {
    let ids = parse_movie_ids(movies)?;
    fetch_recommendations(api, &ids, top_k).await
}

/// Fetch details for `known`, request `top_k` recommendations, then fetch
/// details for every recommended id.
///
/// Detail fetches in each step run concurrently; the first failure fails the
/// whole run.
pub async fn fetch_recommendations(
    api: &dyn MovieApi,
    known: &[MovieId],
    top_k: u32,
) -> Result<Recommendations, RecommendError> {
    if known.is_empty() {
        return Err(RecommendError::NoMoviesSelected);
    }

    let selected = fetch_details(api, known).await?;
    debug!(count = selected.len(), "Resolved known movies");

    let request = RecommendRequest {
        known_movies: known.to_vec(),
        top_k,
    };
    let response = api
        .recommend(&request)
        .await
        .map_err(RecommendError::Recommend)?;

    let ids: Vec<MovieId> = response
        .recommendations
        .iter()
        .map(|r| r.movie_id)
        .collect();
    let movies = fetch_details(api, &ids).await?;

    let recommended: Vec<RecommendedMovie> = movies
        .into_iter()
        .zip(response.recommendations)
        .map(|(movie, rec)| RecommendedMovie {
            movie,
            score: rec.score,
        })
        .collect();

    info!(
        known = known.len(),
        recommended = recommended.len(),
        "Recommendations ready"
    );

    Ok(Recommendations {
        recommended,
        selected,
    })
}

async fn fetch_details(api: &dyn MovieApi, ids: &[MovieId]) -> Result<Vec<Movie>, RecommendError> {
    try_join_all(ids.iter().map(|&id| async move {
        api.get_movie(id)
            .await
            .map_err(|source| RecommendError::MovieDetails { id, source })
    }))
    .await
}
