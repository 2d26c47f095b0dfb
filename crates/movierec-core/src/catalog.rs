//! Catalog view model: paging, year/search filters, fetch phase, and the
//! selection set.
//!
//! Every operation that needs data returns a [`CatalogRequest`] for the caller
//! to execute; results come back through [`CatalogState::apply`]. Requests are
//! numbered, and only the result of the most recent one is applied.

use tracing::{debug, warn};

use crate::api::{ApiError, MovieQuery};
use crate::pagination::{PageLabel, page_labels};
use crate::selection::Selection;
use crate::{Movie, MovieId, MoviePage, SelectedMovie};

/// Movies per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 16;

/// Message shown when a catalog page cannot be loaded.
pub const FETCH_ERROR: &str = "Failed to fetch movies";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// A page fetch to perform, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    pub generation: u64,
    pub query: MovieQuery,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    page: u32,
    year: Option<u16>,
    search: String,
    phase: CatalogPhase,
    movies: Vec<Movie>,
    total_pages: u32,
    total: u64,
    generation: u64,
    page_size: u32,
    selection: Selection,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CatalogState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            year: None,
            search: String::new(),
            phase: CatalogPhase::Idle,
            movies: Vec::new(),
            total_pages: 0,
            total: 0,
            generation: 0,
            page_size: page_size.max(1),
            selection: Selection::new(),
        }
    }

    // ── fetch lifecycle ──────────────────────────────────────────────

    /// Enter `Loading` and produce the request for the current filters.
    pub fn begin_fetch(&mut self) -> CatalogRequest {
        self.generation += 1;
        self.phase = CatalogPhase::Loading;
        CatalogRequest {
            generation: self.generation,
            query: self.query(),
        }
    }

    /// Refetch the current page with the current filters.
    pub fn reload(&mut self) -> CatalogRequest {
        self.begin_fetch()
    }

    /// Apply the outcome of a fetch. Returns `false` if the result belongs to
    /// a superseded request and was dropped.
    pub fn apply(&mut self, generation: u64, result: Result<MoviePage, ApiError>) -> bool {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Dropping stale catalog response"
            );
            return false;
        }

        match result {
            Ok(page) => {
                self.movies = page.movies;
                self.total_pages = page.pages;
                self.total = page.total;
                self.phase = CatalogPhase::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Catalog fetch failed");
                self.movies.clear();
                self.total_pages = 0;
                self.total = 0;
                self.phase = CatalogPhase::Error(FETCH_ERROR.to_string());
            }
        }
        true
    }

    fn query(&self) -> MovieQuery {
        MovieQuery {
            year: self.year,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            ..MovieQuery::page(self.page, self.page_size)
        }
    }

    // ── paging ───────────────────────────────────────────────────────

    /// Go to `page`. Ignored (returns `None`) when it is the current page or
    /// outside `[1, total_pages]`.
    pub fn set_page(&mut self, page: u32) -> Option<CatalogRequest> {
        if page == 0 || page > self.total_pages.max(1) || page == self.page {
            return None;
        }
        self.page = page;
        Some(self.begin_fetch())
    }

    pub fn next_page(&mut self) -> Option<CatalogRequest> {
        self.set_page(self.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<CatalogRequest> {
        self.set_page(self.page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> Option<CatalogRequest> {
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> Option<CatalogRequest> {
        self.set_page(self.total_pages)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn page_labels(&self) -> Vec<PageLabel> {
        page_labels(self.page, self.total_pages)
    }

    // ── filters ──────────────────────────────────────────────────────

    /// Change the year filter and go back to page 1.
    pub fn set_year(&mut self, year: Option<u16>) -> Option<CatalogRequest> {
        if year == self.year {
            return None;
        }
        self.year = year;
        self.page = 1;
        Some(self.begin_fetch())
    }

    /// Change the search term and go back to page 1.
    pub fn set_search(&mut self, search: impl Into<String>) -> Option<CatalogRequest> {
        let search = search.into();
        if search == self.search {
            return None;
        }
        self.search = search;
        self.page = 1;
        Some(self.begin_fetch())
    }

    // ── selection ────────────────────────────────────────────────────

    pub fn select(&mut self, movie: &Movie) -> bool {
        self.selection.select(SelectedMovie::from(movie))
    }

    pub fn deselect(&mut self, id: MovieId) -> bool {
        self.selection.deselect(id)
    }

    /// Returns whether the movie is selected afterwards.
    pub fn toggle(&mut self, movie: &Movie) -> bool {
        self.selection.toggle(SelectedMovie::from(movie))
    }

    pub fn clear_all(&mut self) {
        self.selection.clear_all();
    }

    /// Whether toggling `id` would do anything: it is already selected or
    /// there is room for it.
    pub fn can_toggle(&self, id: MovieId) -> bool {
        self.selection.contains(id) || !self.selection.is_full()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // ── accessors ────────────────────────────────────────────────────

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn phase(&self) -> &CatalogPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == CatalogPhase::Loading
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: Some("1999".to_string()),
            genres: Some("Drama".to_string()),
            imdb_id: None,
            tmdb_id: None,
        }
    }

    fn page_of(ids: &[MovieId], pages: u32) -> MoviePage {
        MoviePage {
            movies: ids.iter().copied().map(movie).collect(),
            total: u64::from(pages) * 16,
            pages,
        }
    }

    /// A catalog that has loaded page 1 of `pages`.
    fn loaded(pages: u32) -> CatalogState {
        let mut catalog = CatalogState::default();
        let req = catalog.begin_fetch();
        assert!(catalog.apply(req.generation, Ok(page_of(&[1, 2, 3], pages))));
        catalog
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            path: "/movies".to_string(),
            status: 500,
        }
    }

    #[test]
    fn starts_idle_on_page_one() {
        let catalog = CatalogState::default();
        assert_eq!(catalog.phase(), &CatalogPhase::Idle);
        assert_eq!(catalog.page(), 1);
        assert!(catalog.movies().is_empty());
    }

    #[test]
    fn first_fetch_query() {
        let mut catalog = CatalogState::default();
        let req = catalog.begin_fetch();
        assert_eq!(catalog.phase(), &CatalogPhase::Loading);
        assert_eq!(req.query.to_path(), "/movies?skip=0&limit=16");
    }

    #[test]
    fn success_moves_to_ready() {
        let catalog = loaded(4);
        assert_eq!(catalog.phase(), &CatalogPhase::Ready);
        assert_eq!(catalog.movies().len(), 3);
        assert_eq!(catalog.total_pages(), 4);
    }

    #[test]
    fn failure_clears_movies_and_sets_message() {
        let mut catalog = loaded(4);
        let req = catalog.reload();
        assert!(catalog.apply(req.generation, Err(server_error())));
        assert_eq!(
            catalog.phase(),
            &CatalogPhase::Error("Failed to fetch movies".to_string())
        );
        assert!(catalog.movies().is_empty());
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut catalog = loaded(4);
        let req = catalog.set_year(Some(1995)).unwrap();
        catalog.apply(req.generation, Ok(page_of(&[1], 4)));

        let req = catalog.next_page().unwrap();
        assert_eq!(catalog.page(), 2);
        assert_eq!(req.query.to_path(), "/movies?skip=16&limit=16&year=1995");
    }

    #[test]
    fn out_of_range_and_same_page_are_ignored() {
        let mut catalog = loaded(3);
        assert!(catalog.prev_page().is_none());
        assert!(catalog.set_page(1).is_none());
        assert!(catalog.set_page(4).is_none());
        assert!(catalog.set_page(0).is_none());
        assert_eq!(catalog.phase(), &CatalogPhase::Ready);

        let req = catalog.last_page().unwrap();
        assert_eq!(req.query.skip, 32);
        assert!(catalog.next_page().is_none());
        assert!(!catalog.has_next());
        assert!(catalog.has_prev());
    }

    #[test]
    fn year_change_resets_page() {
        let mut catalog = loaded(5);
        let req = catalog.set_page(3).unwrap();
        catalog.apply(req.generation, Ok(page_of(&[7], 5)));

        let req = catalog.set_year(Some(2001)).unwrap();
        assert_eq!(catalog.page(), 1);
        assert_eq!(req.query.to_path(), "/movies?skip=0&limit=16&year=2001");
        assert!(catalog.set_year(Some(2001)).is_none());
    }

    #[test]
    fn search_change_resets_page_and_encodes() {
        let mut catalog = loaded(5);
        let req = catalog.set_page(2).unwrap();
        catalog.apply(req.generation, Ok(page_of(&[7], 5)));

        let req = catalog.set_search("the matrix").unwrap();
        assert_eq!(catalog.page(), 1);
        assert_eq!(
            req.query.to_path(),
            "/movies?skip=0&limit=16&search=the%20matrix"
        );
        assert!(catalog.set_search("the matrix").is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut catalog = loaded(5);
        let old = catalog.set_search("a").unwrap();
        let new = catalog.set_search("ab").unwrap();

        assert!(catalog.apply(new.generation, Ok(page_of(&[20], 1))));
        assert!(!catalog.apply(old.generation, Ok(page_of(&[10, 11], 2))));

        assert_eq!(catalog.movies()[0].id, 20);
        assert_eq!(catalog.total_pages(), 1);
    }

    #[test]
    fn selection_is_independent_of_fetch_state() {
        let mut catalog = loaded(2);
        let m = catalog.movies()[0].clone();
        assert!(catalog.select(&m));
        let req = catalog.reload();
        catalog.apply(req.generation, Err(server_error()));
        assert!(catalog.selection().contains(m.id));
    }

    #[test]
    fn select_rejects_sixth_and_duplicate() {
        let mut catalog = CatalogState::default();
        for id in 1..=5 {
            assert!(catalog.select(&movie(id)));
        }
        assert!(!catalog.select(&movie(6)));
        assert!(!catalog.select(&movie(1)));
        assert_eq!(catalog.selection().ids(), vec![1, 2, 3, 4, 5]);
        assert!(!catalog.can_toggle(6));
        assert!(catalog.can_toggle(3));

        catalog.clear_all();
        assert!(catalog.selection().is_empty());
    }

    #[test]
    fn labels_follow_current_page() {
        let mut catalog = loaded(10);
        let req = catalog.set_page(5).unwrap();
        catalog.apply(req.generation, Ok(page_of(&[1], 10)));
        assert_eq!(catalog.page_labels().len(), 7);
    }
}
