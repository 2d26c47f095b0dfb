use crate::nav::Route;
use crate::{MovieId, SelectedMovie};

/// Number of movies needed (and allowed) for a recommendation request.
pub const MAX_SELECTION: usize = 5;

/// The user's in-progress pick of up to [`MAX_SELECTION`] movies.
///
/// Insertion-ordered and unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    movies: Vec<SelectedMovie>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a movie. Returns `false` (and changes nothing) if the set is full
    /// or the movie is already selected.
    pub fn select(&mut self, movie: SelectedMovie) -> bool {
        if self.is_full() || self.contains(movie.id) {
            return false;
        }
        self.movies.push(movie);
        true
    }

    /// Remove a movie by id. Returns whether it was present.
    pub fn deselect(&mut self, id: MovieId) -> bool {
        let before = self.movies.len();
        self.movies.retain(|m| m.id != id);
        self.movies.len() != before
    }

    /// Select if absent, deselect if present. Returns whether the movie is
    /// selected afterwards.
    pub fn toggle(&mut self, movie: SelectedMovie) -> bool {
        if self.deselect(movie.id) {
            false
        } else {
            self.select(movie)
        }
    }

    pub fn clear_all(&mut self) {
        self.movies.clear();
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn is_full(&self) -> bool {
        self.movies.len() >= MAX_SELECTION
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// How many more picks are needed before recommendations unlock.
    pub fn remaining(&self) -> usize {
        MAX_SELECTION.saturating_sub(self.movies.len())
    }

    pub fn movies(&self) -> &[SelectedMovie] {
        &self.movies
    }

    pub fn ids(&self) -> Vec<MovieId> {
        self.movies.iter().map(|m| m.id).collect()
    }

    /// Route to the recommendations screen for the current picks.
    /// `None` until exactly [`MAX_SELECTION`] movies are selected.
    pub fn recommendation_route(&self) -> Option<Route> {
        if self.movies.len() != MAX_SELECTION {
            return None;
        }
        Some(Route::recommendations_for(&self.ids()))
    }

    /// Label for the cart's action button.
    pub fn action_label(&self) -> String {
        match self.remaining() {
            0 => "Discover Your Perfect Movies!".to_string(),
            1 => "Select 1 More Movie".to_string(),
            n => format!("Select {} More Movies", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId) -> SelectedMovie {
        SelectedMovie {
            id,
            title: format!("Movie {id}"),
        }
    }

    fn full() -> Selection {
        let mut sel = Selection::new();
        for id in 1..=5 {
            assert!(sel.select(movie(id)));
        }
        sel
    }

    #[test]
    fn sixth_select_is_rejected() {
        let mut sel = full();
        let before = sel.clone();
        assert!(!sel.select(movie(6)));
        assert_eq!(sel, before);
        assert_eq!(sel.ids(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn duplicate_select_is_rejected() {
        let mut sel = Selection::new();
        assert!(sel.select(movie(1)));
        assert!(!sel.select(movie(1)));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn deselect_keeps_order_of_others() {
        let mut sel = full();
        assert!(sel.deselect(3));
        assert!(!sel.deselect(3));
        assert_eq!(sel.ids(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = Selection::new();
        assert!(sel.toggle(movie(4)));
        assert!(sel.contains(4));
        assert!(!sel.toggle(movie(4)));
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_on_full_set_still_deselects() {
        let mut sel = full();
        assert!(!sel.toggle(movie(2)));
        assert_eq!(sel.len(), 4);
        assert!(sel.toggle(movie(9)));
        assert!(sel.is_full());
    }

    #[test]
    fn clear_all_empties() {
        let mut sel = full();
        sel.clear_all();
        assert!(sel.is_empty());
        assert_eq!(sel.remaining(), 5);
    }

    #[test]
    fn route_only_when_full() {
        let mut sel = Selection::new();
        for id in 1..=4 {
            sel.select(movie(id));
            assert!(sel.recommendation_route().is_none());
        }
        sel.select(movie(5));
        assert_eq!(
            sel.recommendation_route().unwrap().to_string(),
            "/recommendations?movies=1,2,3,4,5"
        );
    }

    #[test]
    fn action_label_counts_down() {
        let mut sel = Selection::new();
        assert_eq!(sel.action_label(), "Select 5 More Movies");
        for id in 1..=4 {
            sel.select(movie(id));
        }
        assert_eq!(sel.action_label(), "Select 1 More Movie");
        sel.select(movie(5));
        assert_eq!(sel.action_label(), "Discover Your Perfect Movies!");
    }
}
