mod backend;
mod update;

use ratatui::layout::Rect;
use tokio::sync::mpsc;

use movierec_core::{CatalogRequest, CatalogState, Config, Route};

use crate::model::poster::{PosterPane, PosterTarget};
use crate::model::recommendations::RecommendationsState;
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Catalog,
    Recommendations,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Which catalog panel receives movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Movies,
    Cart,
}

/// Main application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub focus: Focus,

    /// Paging, filters, fetch phase, and the selection set.
    pub catalog: CatalogState,
    /// Row under the cursor in the movie table.
    pub cursor: usize,
    pub cart_cursor: usize,
    /// Text in the search box (may run ahead of the applied search term).
    pub search_buffer: String,
    /// Year filter choices, newest first.
    pub years: Vec<u16>,
    /// Index into `years`; `None` is "All years".
    pub year_index: Option<usize>,

    pub recs: RecommendationsState,
    pub catalog_poster: PosterPane,
    pub recs_poster: PosterPane,

    pub api_url: String,
    pub tick: usize,
    pub theme: Theme,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(config: &Config, theme: Theme) -> Self {
        Self {
            screen: Screen::Catalog,
            input_mode: InputMode::Normal,
            focus: Focus::Movies,
            catalog: CatalogState::new(config.page_size),
            cursor: 0,
            cart_cursor: 0,
            search_buffer: String::new(),
            years: config.available_years(),
            year_index: None,
            recs: RecommendationsState::default(),
            catalog_poster: PosterPane::new(PosterTarget::Catalog),
            recs_poster: PosterPane::new(PosterTarget::Recommendations),
            api_url: config.api_url.clone(),
            tick: 0,
            theme,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            backend_cmd_tx: None,
        }
    }

    /// Load the first catalog page and open `route`.
    pub fn start(&mut self, route: Route) {
        let request = self.catalog.begin_fetch();
        self.fetch(Some(request));
        self.navigate(route);
    }

    pub(crate) fn send(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    /// Dispatch a catalog request, if the state change produced one.
    pub(crate) fn fetch(&mut self, request: Option<CatalogRequest>) {
        if let Some(request) = request {
            self.cursor = 0;
            self.send(BackendCommand::FetchCatalog(request));
        }
    }

    /// Switch screens to `route`.
    pub fn navigate(&mut self, route: Route) {
        match route {
            Route::Catalog => self.back_to_catalog(),
            Route::Recommendations { movies } => self.open_recommendations(movies),
        }
    }

    /// The route of the screen being shown.
    pub fn current_route(&self) -> Route {
        match self.screen {
            Screen::Catalog => Route::Catalog,
            Screen::Recommendations => self.recs.route(),
        }
    }

    pub(crate) fn open_recommendations(&mut self, movies: Option<String>) {
        self.screen = Screen::Recommendations;
        self.input_mode = InputMode::Normal;
        self.recs_poster.clear();
        if let Some((generation, ids)) = self.recs.open(movies) {
            tracing::info!(?ids, "Requesting recommendations");
            self.send(BackendCommand::Recommend { generation, ids });
        }
    }

    pub(crate) fn rerun_recommendations(&mut self) {
        self.recs_poster.clear();
        if let Some((generation, ids)) = self.recs.rerun() {
            self.send(BackendCommand::Recommend { generation, ids });
        }
    }

    pub(crate) fn back_to_catalog(&mut self) {
        self.recs.close();
        self.recs_poster.clear();
        self.screen = Screen::Catalog;
    }

    /// Point the catalog poster at the movie under the cursor.
    pub(crate) fn sync_catalog_poster(&mut self) {
        match self.catalog.movies().get(self.cursor).map(|m| m.id) {
            Some(movie_id) => {
                if let Some(generation) = self.catalog_poster.show(movie_id) {
                    self.send(BackendCommand::FetchPoster {
                        target: PosterTarget::Catalog,
                        generation,
                        movie_id,
                    });
                }
            }
            None => self.catalog_poster.clear(),
        }
    }

    pub(crate) fn sync_recs_poster(&mut self) {
        match self.recs.movie_at_cursor().map(|m| m.id) {
            Some(movie_id) => {
                if let Some(generation) = self.recs_poster.show(movie_id) {
                    self.send(BackendCommand::FetchPoster {
                        target: PosterTarget::Recommendations,
                        generation,
                        movie_id,
                    });
                }
            }
            None => self.recs_poster.clear(),
        }
    }

    pub(crate) fn poster_pane_mut(&mut self, target: PosterTarget) -> &mut PosterPane {
        match target {
            PosterTarget::Catalog => &mut self.catalog_poster,
            PosterTarget::Recommendations => &mut self.recs_poster,
        }
    }

    /// Label of the active year filter.
    pub fn year_label(&self) -> String {
        match self.catalog.year() {
            Some(year) => year.to_string(),
            None => "All years".to_string(),
        }
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        let content_area = crate::view::banner::render_title_bar(f, area, self);

        // Split footer row out first so it spans the full terminal width.
        let footer_area = Rect {
            x: content_area.x,
            y: content_area.y + content_area.height.saturating_sub(1),
            width: content_area.width,
            height: 1.min(content_area.height),
        };
        let body_area = Rect {
            height: content_area.height.saturating_sub(1),
            ..content_area
        };

        match self.screen {
            Screen::Catalog => crate::view::catalog::render_in(f, self, body_area, footer_area),
            Screen::Recommendations => {
                crate::view::recommendations::render_in(f, self, body_area, footer_area)
            }
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
