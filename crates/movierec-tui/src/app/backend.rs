use super::{App, Screen};
use crate::tui_event::BackendEvent;

impl App {
    /// Process a backend event and update model state.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::CatalogLoaded { generation, result } => {
                if self.catalog.apply(generation, result) {
                    let len = self.catalog.movies().len();
                    self.cursor = self.cursor.min(len.saturating_sub(1));
                    self.sync_catalog_poster();
                }
            }
            BackendEvent::SearchSettled { term } => {
                // A settled term only matters while it still matches the box
                if term == self.search_buffer {
                    let request = self.catalog.set_search(term);
                    self.fetch(request);
                }
            }
            BackendEvent::PosterLoaded {
                target,
                generation,
                poster,
            } => {
                self.poster_pane_mut(target).complete(generation, poster);
            }
            BackendEvent::PosterReleased { target, movie_id } => {
                self.poster_pane_mut(target).evict(movie_id);
            }
            BackendEvent::RecommendationsLoaded { generation, result } => {
                if self.recs.apply(generation, result) && self.screen == Screen::Recommendations {
                    self.sync_recs_poster();
                }
            }
        }
    }
}
