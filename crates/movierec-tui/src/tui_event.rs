use movierec_core::{
    ApiError, CatalogRequest, MovieId, MoviePage, PosterHandle, RecommendError, Recommendations,
};

use crate::model::poster::PosterTarget;

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Load one catalog page.
    FetchCatalog(CatalogRequest),
    /// The search box changed; reported back as `SearchSettled` once typing
    /// pauses.
    SearchChanged(String),
    /// Load the poster for `movie_id` into the given pane.
    FetchPoster {
        target: PosterTarget,
        generation: u64,
        movie_id: MovieId,
    },
    /// Run the recommendation workflow for already-parsed known movies.
    Recommend { generation: u64, ids: Vec<MovieId> },
}

/// Events flowing from the backend to the TUI.
#[derive(Debug)]
pub enum BackendEvent {
    CatalogLoaded {
        generation: u64,
        result: Result<MoviePage, ApiError>,
    },
    /// Debounced search term.
    SearchSettled { term: String },
    /// `None` means no poster is available.
    PosterLoaded {
        target: PosterTarget,
        generation: u64,
        poster: Option<PosterHandle>,
    },
    /// A poster resource loaded for `target` was freed.
    PosterReleased {
        target: PosterTarget,
        movie_id: MovieId,
    },
    RecommendationsLoaded {
        generation: u64,
        result: Result<Recommendations, RecommendError>,
    },
}
