use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod catalog;
pub mod config_file;
pub mod debounce;
pub mod nav;
pub mod pagination;
pub mod poster;
pub mod recommend;
pub mod selection;

// Re-export for convenience
pub use api::{ApiError, HttpMovieApi, MovieApi, MovieQuery};
pub use catalog::{CatalogPhase, CatalogRequest, CatalogState};
pub use debounce::{Debouncer, debounce};
pub use nav::{Route, parse_movie_ids};
pub use pagination::{PageLabel, page_labels};
pub use poster::{PosterHandle, PosterSlot, PosterState, ReleaseHook, load_poster};
pub use recommend::{
    RecommendError, RecommendedMovie, Recommendations, fetch_recommendations, recommend_for_route,
};
pub use selection::{MAX_SELECTION, Selection};

/// Server-assigned movie identifier.
pub type MovieId = i64;

/// A movie as returned by `GET /movies` and `GET /movies/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tmdb_id: Option<i64>,
}

impl Movie {
    /// Genres arrive pipe-separated (`Action|Comedy`); render them comma-separated.
    pub fn genre_list(&self) -> String {
        self.genres
            .as_deref()
            .map(|g| {
                g.split('|')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}

/// One page of the movie catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub pages: u32,
}

/// The `{id, title}` subset of a movie kept in the selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMovie {
    pub id: MovieId,
    pub title: String,
}

impl From<&Movie> for SelectedMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

/// A single `{movieId, score}` entry from `POST /recommend`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    pub score: f64,
}

/// Resolved runtime configuration (CLI > env > config file > defaults).
#[derive(Debug, Clone)]
pub struct Config {
    /// API origin, e.g. `http://localhost:8000`.
    pub api_url: String,
    /// Per-request timeout. `None` leaves it to the network stack.
    pub request_timeout: Option<Duration>,
    pub page_size: u32,
    pub search_debounce: Duration,
    /// Year filter choices, inclusive.
    pub first_year: u16,
    pub last_year: u16,
    pub top_k: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            request_timeout: None,
            page_size: catalog::DEFAULT_PAGE_SIZE,
            search_debounce: Duration::from_millis(300),
            first_year: 1902,
            last_year: 2018,
            top_k: recommend::DEFAULT_TOP_K,
        }
    }
}

impl Config {
    /// Overlay the values present in a loaded config file onto `self`.
    pub fn apply_file(&mut self, file: &config_file::ConfigFile) {
        if let Some(api) = &file.api {
            if let Some(url) = &api.url {
                self.api_url = url.clone();
            }
            if let Some(secs) = api.timeout_secs {
                self.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
        }
        if let Some(catalog) = &file.catalog {
            if let Some(size) = catalog.page_size {
                self.page_size = size.max(1);
            }
            if let Some(ms) = catalog.search_debounce_ms {
                self.search_debounce = Duration::from_millis(ms);
            }
            if let Some(year) = catalog.first_year {
                self.first_year = year;
            }
            if let Some(year) = catalog.last_year {
                self.last_year = year;
            }
        }
        if let Some(top_k) = file.recommendations.as_ref().and_then(|r| r.top_k) {
            self.top_k = top_k.max(1);
        }
    }

    /// Years offered by the year filter, newest first.
    pub fn available_years(&self) -> Vec<u16> {
        (self.first_year.min(self.last_year)..=self.last_year.max(self.first_year))
            .rev()
            .collect()
    }
}
