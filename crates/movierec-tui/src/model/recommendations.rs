use movierec_core::{
    Movie, MovieId, RecommendError, Recommendations, RecommendedMovie, Route, parse_movie_ids,
};

/// Lifecycle of the recommendations screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecPhase {
    #[default]
    Idle,
    Loading,
    Ready(Recommendations),
    /// Terminal error message for the whole screen.
    Error(String),
}

/// One row of the recommendations screen.
pub enum RecEntry<'a> {
    Recommended(&'a RecommendedMovie),
    Selected(&'a Movie),
}

impl RecEntry<'_> {
    pub fn movie(&self) -> &Movie {
        match self {
            RecEntry::Recommended(r) => &r.movie,
            RecEntry::Selected(m) => m,
        }
    }
}

#[derive(Debug, Default)]
pub struct RecommendationsState {
    /// Raw `movies` parameter of the route that opened the screen.
    movies: Option<String>,
    generation: u64,
    pub phase: RecPhase,
    pub cursor: usize,
}

impl RecommendationsState {
    /// Start a run for the route's `movies` parameter.
    ///
    /// Returns the generation and ids to fetch, or `None` when the parameter
    /// is unusable, in which case the screen is already in its error state
    /// and nothing should be sent to the backend.
    pub fn open(&mut self, movies: Option<String>) -> Option<(u64, Vec<MovieId>)> {
        self.movies = movies;
        self.cursor = 0;
        self.generation += 1;
        match parse_movie_ids(self.movies.as_deref()) {
            Ok(ids) => {
                self.phase = RecPhase::Loading;
                Some((self.generation, ids))
            }
            Err(e) => {
                self.phase = RecPhase::Error(e.to_string());
                None
            }
        }
    }

    /// Re-run for the same route.
    pub fn rerun(&mut self) -> Option<(u64, Vec<MovieId>)> {
        let movies = self.movies.clone();
        self.open(movies)
    }

    /// Leave the screen; any in-flight run is ignored when it lands.
    pub fn close(&mut self) {
        self.generation += 1;
        self.phase = RecPhase::Idle;
        self.cursor = 0;
    }

    /// Returns `false` for a result from a superseded run.
    pub fn apply(&mut self, generation: u64, result: Result<Recommendations, RecommendError>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = match result {
            Ok(recs) => RecPhase::Ready(recs),
            Err(e) => RecPhase::Error(e.to_string()),
        };
        self.cursor = 0;
        true
    }

    pub fn route(&self) -> Route {
        Route::Recommendations {
            movies: self.movies.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RecPhase::Loading
    }

    /// Recommended movies first, then the selected ones.
    pub fn entries(&self) -> Vec<RecEntry<'_>> {
        match &self.phase {
            RecPhase::Ready(recs) => recs
                .recommended
                .iter()
                .map(RecEntry::Recommended)
                .chain(recs.selected.iter().map(RecEntry::Selected))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn entry_count(&self) -> usize {
        match &self.phase {
            RecPhase::Ready(recs) => recs.recommended.len() + recs.selected.len(),
            _ => 0,
        }
    }

    pub fn movie_at_cursor(&self) -> Option<&Movie> {
        let RecPhase::Ready(recs) = &self.phase else {
            return None;
        };
        let n = recs.recommended.len();
        if self.cursor < n {
            Some(&recs.recommended[self.cursor].movie)
        } else {
            recs.selected.get(self.cursor - n)
        }
    }
}
