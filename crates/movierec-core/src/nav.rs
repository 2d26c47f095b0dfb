//! Screen routes and their literal form.
//!
//! The recommendations screen is addressed as
//! `/recommendations?movies=1,2,3,4,5`; the catalog is `/`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::MovieId;
use crate::recommend::RecommendError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Catalog,
    /// `movies` is the raw (decoded) value of the `movies` query parameter,
    /// `None` when the parameter is absent.
    Recommendations { movies: Option<String> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl Route {
    /// Route for a recommendation request seeded with `ids`.
    pub fn recommendations_for(ids: &[MovieId]) -> Self {
        let movies = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Route::Recommendations {
            movies: Some(movies),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => f.write_str("/"),
            Route::Recommendations { movies: None } => f.write_str("/recommendations"),
            Route::Recommendations { movies: Some(m) } => {
                write!(f, "/recommendations?movies={}", m)
            }
        }
    }
}

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (path, query) = match s.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (s, None),
        };

        match path.trim_end_matches('/') {
            "" => Ok(Route::Catalog),
            "/recommendations" | "recommendations" => Ok(Route::Recommendations {
                movies: query.and_then(|q| query_param(q, "movies")),
            }),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

/// Decoded value of `key` in an `a=1&b=2` query string.
fn query_param(query: &str, key: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if k != key {
            return None;
        }
        Some(
            urlencoding::decode(v)
                .map(|d| d.into_owned())
                .unwrap_or_else(|_| v.to_string()),
        )
    })
}

/// Parse the `movies` parameter into known-movie ids.
///
/// Blank tokens are skipped and duplicates collapse to their first
/// occurrence. An absent or effectively empty value is
/// [`RecommendError::NoMoviesSelected`].
pub fn parse_movie_ids(raw: Option<&str>) -> Result<Vec<MovieId>, RecommendError> {
    let raw = raw.ok_or(RecommendError::NoMoviesSelected)?;

    let mut ids: Vec<MovieId> = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let id: MovieId = token
            .parse()
            .map_err(|_| RecommendError::InvalidMovieId(token.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if ids.is_empty() {
        return Err(RecommendError::NoMoviesSelected);
    }
    Ok(ids)
}
