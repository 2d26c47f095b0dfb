use super::{App, Focus, InputMode, Screen};
use crate::action::Action;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Global actions that work in every state
        match action {
            Action::ForceQuit => {
                self.should_quit = true;
                return true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(..) => {
                // Layout is recomputed from the frame on every draw
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Help overlay swallows input until dismissed
        if self.show_help {
            if matches!(
                action,
                Action::ToggleHelp | Action::NavigateBack | Action::Quit
            ) {
                self.show_help = false;
            }
            return false;
        }

        if self.input_mode == InputMode::Search {
            self.update_search(action);
            return false;
        }

        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            _ => match self.screen {
                Screen::Catalog => self.update_catalog(action),
                Screen::Recommendations => self.update_recommendations(action),
            },
        }
        false
    }

    fn update_search(&mut self, action: Action) {
        match action {
            Action::SearchInput(ch) => {
                self.search_buffer.push(ch);
                self.send(BackendCommand::SearchChanged(self.search_buffer.clone()));
            }
            Action::SearchBackspace => {
                if self.search_buffer.pop().is_some() {
                    self.send(BackendCommand::SearchChanged(self.search_buffer.clone()));
                }
            }
            Action::SearchConfirm => {
                self.input_mode = InputMode::Normal;
                let term = self.search_buffer.clone();
                let request = self.catalog.set_search(term);
                self.fetch(request);
            }
            Action::SearchCancel => {
                self.input_mode = InputMode::Normal;
                self.search_buffer = self.catalog.search().to_string();
                // Settle any pending keystrokes back onto the applied term
                self.send(BackendCommand::SearchChanged(self.search_buffer.clone()));
            }
            _ => {}
        }
    }

    fn update_catalog(&mut self, action: Action) {
        match action {
            Action::MoveDown => match self.focus {
                Focus::Movies => {
                    let len = self.catalog.movies().len();
                    if len > 0 {
                        self.cursor = (self.cursor + 1).min(len - 1);
                        self.sync_catalog_poster();
                    }
                }
                Focus::Cart => {
                    let len = self.catalog.selection().len();
                    if len > 0 {
                        self.cart_cursor = (self.cart_cursor + 1).min(len - 1);
                    }
                }
            },
            Action::MoveUp => match self.focus {
                Focus::Movies => {
                    self.cursor = self.cursor.saturating_sub(1);
                    self.sync_catalog_poster();
                }
                Focus::Cart => {
                    self.cart_cursor = self.cart_cursor.saturating_sub(1);
                }
            },
            Action::NextPage => {
                let request = self.catalog.next_page();
                self.fetch(request);
            }
            Action::PrevPage => {
                let request = self.catalog.prev_page();
                self.fetch(request);
            }
            Action::FirstPage => {
                let request = self.catalog.first_page();
                self.fetch(request);
            }
            Action::LastPage => {
                let request = self.catalog.last_page();
                self.fetch(request);
            }
            Action::Reload => {
                let request = self.catalog.reload();
                self.fetch(Some(request));
            }
            Action::ToggleSelect => {
                if self.focus == Focus::Movies
                    && let Some(movie) = self.catalog.movies().get(self.cursor).cloned()
                    && self.catalog.can_toggle(movie.id)
                {
                    self.catalog.toggle(&movie);
                }
            }
            Action::StartSearch => {
                self.input_mode = InputMode::Search;
                self.search_buffer = self.catalog.search().to_string();
            }
            Action::OlderYear => {
                let last = self.years.len().saturating_sub(1);
                if !self.years.is_empty() {
                    let next = match self.year_index {
                        None => 0,
                        Some(i) => (i + 1).min(last),
                    };
                    self.set_year_index(Some(next));
                }
            }
            Action::NewerYear => {
                let next = match self.year_index {
                    None | Some(0) => None,
                    Some(i) => Some(i - 1),
                };
                self.set_year_index(next);
            }
            Action::ClearYear => {
                self.set_year_index(None);
            }
            Action::ToggleCartFocus => {
                self.focus = match self.focus {
                    Focus::Movies if !self.catalog.selection().is_empty() => Focus::Cart,
                    _ => Focus::Movies,
                };
                self.cart_cursor = 0;
            }
            Action::NavigateBack => {
                self.focus = Focus::Movies;
            }
            Action::RemoveFromCart => {
                if self.focus == Focus::Cart
                    && let Some(id) = self.catalog.selection().movies().get(self.cart_cursor).map(|m| m.id)
                {
                    self.catalog.deselect(id);
                    let len = self.catalog.selection().len();
                    if len == 0 {
                        self.focus = Focus::Movies;
                        self.cart_cursor = 0;
                    } else {
                        self.cart_cursor = self.cart_cursor.min(len - 1);
                    }
                }
            }
            Action::ClearSelection => {
                self.catalog.clear_all();
                self.cart_cursor = 0;
                self.focus = Focus::Movies;
            }
            Action::Submit => {
                // The cart's button is only live with a full selection
                if let Some(route) = self.catalog.selection().recommendation_route() {
                    self.navigate(route);
                }
            }
            _ => {}
        }
    }

    fn set_year_index(&mut self, index: Option<usize>) {
        self.year_index = index;
        let year = index.and_then(|i| self.years.get(i).copied());
        let request = self.catalog.set_year(year);
        self.fetch(request);
    }

    fn update_recommendations(&mut self, action: Action) {
        match action {
            Action::MoveDown => {
                let len = self.recs.entry_count();
                if len > 0 {
                    self.recs.cursor = (self.recs.cursor + 1).min(len - 1);
                    self.sync_recs_poster();
                }
            }
            Action::MoveUp => {
                self.recs.cursor = self.recs.cursor.saturating_sub(1);
                self.sync_recs_poster();
            }
            Action::Reload => {
                self.rerun_recommendations();
            }
            Action::NavigateBack => {
                self.back_to_catalog();
            }
            _ => {}
        }
    }
}
