use image::DynamicImage;
use tokio::sync::mpsc;

use movierec_core::{
    ApiError, CatalogPhase, Config, Movie, MovieId, MoviePage, PosterHandle, Recommendations, Route,
};

use super::*;
use crate::action::Action;
use crate::model::poster::PosterTarget;
use crate::model::recommendations::RecPhase;
use crate::tui_event::{BackendCommand, BackendEvent};

/// App wired to a command channel, with no backend behind it.
fn test_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(&Config::default(), Theme::dark());
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn drain(rx: &mut mpsc::UnboundedReceiver<BackendCommand>) -> Vec<BackendCommand> {
    let mut cmds = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        cmds.push(cmd);
    }
    cmds
}

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

fn page_of(ids: impl IntoIterator<Item = MovieId>, pages: u32) -> MoviePage {
    let movies: Vec<Movie> = ids.into_iter().map(movie).collect();
    MoviePage {
        total: movies.len() as u64,
        movies,
        pages,
    }
}

/// Start the app and deliver the first page.
fn loaded_app(ids: impl IntoIterator<Item = MovieId>) -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    let generation = app.catalog.generation();
    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation,
        result: Ok(page_of(ids, 1)),
    });
    drain(&mut rx);
    (app, rx)
}

fn select_all_on_page(app: &mut App) {
    let n = app.catalog.movies().len();
    for _ in 0..n {
        app.update(Action::ToggleSelect);
        app.update(Action::MoveDown);
    }
}

// ── Startup ─────────────────────────────────────────────────────

#[test]
fn start_fetches_first_catalog_page() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);

    let cmds = drain(&mut rx);
    assert_eq!(cmds.len(), 1);
    match &cmds[0] {
        BackendCommand::FetchCatalog(request) => {
            assert_eq!(request.query.to_path(), "/movies?skip=0&limit=16");
        }
        other => panic!("unexpected command {other:?}"),
    }
    assert!(app.catalog.is_loading());
    assert_eq!(app.screen, Screen::Catalog);
}

#[test]
fn loaded_page_requests_poster_for_first_row() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    drain(&mut rx);

    let generation = app.catalog.generation();
    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation,
        result: Ok(page_of([7, 8], 1)),
    });

    assert_eq!(app.catalog.phase(), &CatalogPhase::Ready);
    let cmds = drain(&mut rx);
    assert!(matches!(
        cmds.as_slice(),
        [BackendCommand::FetchPoster {
            target: PosterTarget::Catalog,
            movie_id: 7,
            ..
        }]
    ));
}

#[test]
fn failed_page_shows_fetch_error() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    drain(&mut rx);

    let generation = app.catalog.generation();
    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation,
        result: Err(ApiError::Status {
            path: "/movies".to_string(),
            status: 500,
        }),
    });

    assert_eq!(
        app.catalog.phase(),
        &CatalogPhase::Error("Failed to fetch movies".to_string())
    );
    assert!(app.catalog.movies().is_empty());
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn superseded_page_result_is_ignored() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    let first = app.catalog.generation();

    // Changing the year filter supersedes the first fetch
    app.update(Action::OlderYear);
    drain(&mut rx);

    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation: first,
        result: Ok(page_of([1, 2, 3], 1)),
    });

    assert!(app.catalog.is_loading());
    assert!(app.catalog.movies().is_empty());
    assert!(drain(&mut rx).is_empty());
}

// ── Filters ─────────────────────────────────────────────────────

#[test]
fn year_filter_steps_through_years() {
    let (mut app, mut rx) = loaded_app([1]);

    app.update(Action::OlderYear);
    assert_eq!(app.catalog.year(), Some(2018));
    app.update(Action::OlderYear);
    assert_eq!(app.catalog.year(), Some(2017));
    app.update(Action::NewerYear);
    app.update(Action::NewerYear);
    assert_eq!(app.catalog.year(), None);
    assert_eq!(app.year_label(), "All years");

    let paths: Vec<String> = drain(&mut rx)
        .into_iter()
        .filter_map(|cmd| match cmd {
            BackendCommand::FetchCatalog(request) => Some(request.query.to_path()),
            _ => None,
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            "/movies?skip=0&limit=16&year=2018",
            "/movies?skip=0&limit=16&year=2017",
            "/movies?skip=0&limit=16&year=2018",
            "/movies?skip=0&limit=16",
        ]
    );
}

#[test]
fn typing_reports_search_changes() {
    let (mut app, mut rx) = loaded_app([1]);

    app.update(Action::StartSearch);
    assert_eq!(app.input_mode, InputMode::Search);
    app.update(Action::SearchInput('a'));
    app.update(Action::SearchInput('l'));
    app.update(Action::SearchBackspace);

    assert_eq!(
        drain(&mut rx),
        vec![
            BackendCommand::SearchChanged("a".to_string()),
            BackendCommand::SearchChanged("al".to_string()),
            BackendCommand::SearchChanged("a".to_string()),
        ]
    );
    // Nothing applied until the term settles
    assert_eq!(app.catalog.search(), "");
}

#[test]
fn settled_search_fetches_first_page() {
    let (mut app, mut rx) = loaded_app([1]);
    app.update(Action::StartSearch);
    for ch in "star wars".chars() {
        app.update(Action::SearchInput(ch));
    }
    drain(&mut rx);

    app.handle_backend_event(BackendEvent::SearchSettled {
        term: "star wars".to_string(),
    });

    assert_eq!(app.catalog.search(), "star wars");
    assert_eq!(app.catalog.page(), 1);
    match drain(&mut rx).as_slice() {
        [BackendCommand::FetchCatalog(request)] => {
            assert_eq!(
                request.query.to_path(),
                "/movies?skip=0&limit=16&search=star%20wars"
            );
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn outdated_settled_search_is_ignored() {
    let (mut app, mut rx) = loaded_app([1]);
    app.update(Action::StartSearch);
    app.update(Action::SearchInput('x'));
    app.update(Action::SearchInput('y'));
    drain(&mut rx);

    app.handle_backend_event(BackendEvent::SearchSettled {
        term: "x".to_string(),
    });

    assert_eq!(app.catalog.search(), "");
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn search_cancel_restores_applied_term() {
    let (mut app, mut rx) = loaded_app([1]);
    app.update(Action::StartSearch);
    app.update(Action::SearchInput('z'));
    app.update(Action::SearchCancel);

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.search_buffer, "");
    assert_eq!(
        drain(&mut rx).last(),
        Some(&BackendCommand::SearchChanged(String::new()))
    );
}

// ── Selection ───────────────────────────────────────────────────

#[test]
fn sixth_selection_is_rejected() {
    let (mut app, _rx) = loaded_app(1..=6);
    select_all_on_page(&mut app);

    let selection = app.catalog.selection();
    assert_eq!(selection.len(), 5);
    assert!(!selection.contains(6));
    assert_eq!(selection.action_label(), "Discover Your Perfect Movies!");
}

#[test]
fn toggle_twice_deselects() {
    let (mut app, _rx) = loaded_app([1, 2]);
    app.update(Action::ToggleSelect);
    assert!(app.catalog.selection().contains(1));
    app.update(Action::ToggleSelect);
    assert!(app.catalog.selection().is_empty());
}

#[test]
fn cart_remove_and_clear() {
    let (mut app, _rx) = loaded_app(1..=3);
    select_all_on_page(&mut app);

    app.update(Action::ToggleCartFocus);
    assert_eq!(app.focus, Focus::Cart);
    app.update(Action::MoveDown);
    app.update(Action::RemoveFromCart);
    let ids: Vec<MovieId> = app.catalog.selection().ids();
    assert_eq!(ids, vec![1, 3]);

    app.update(Action::ClearSelection);
    assert!(app.catalog.selection().is_empty());
    assert_eq!(app.focus, Focus::Movies);
}

#[test]
fn cart_focus_needs_a_selection() {
    let (mut app, _rx) = loaded_app([1]);
    app.update(Action::ToggleCartFocus);
    assert_eq!(app.focus, Focus::Movies);
}

// ── Recommendations ─────────────────────────────────────────────

#[test]
fn submit_needs_five_movies() {
    let (mut app, mut rx) = loaded_app(1..=4);
    select_all_on_page(&mut app);
    drain(&mut rx);

    app.update(Action::Submit);

    assert_eq!(app.screen, Screen::Catalog);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn submit_with_five_opens_recommendations() {
    let (mut app, mut rx) = loaded_app(1..=5);
    select_all_on_page(&mut app);
    drain(&mut rx);

    app.update(Action::Submit);

    assert_eq!(app.screen, Screen::Recommendations);
    assert_eq!(
        app.current_route().to_string(),
        "/recommendations?movies=1,2,3,4,5"
    );
    assert!(app.recs.is_loading());
    match drain(&mut rx).as_slice() {
        [BackendCommand::Recommend { ids, .. }] => assert_eq!(ids, &vec![1, 2, 3, 4, 5]),
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn opening_without_movies_errors_without_requests() {
    let (mut app, mut rx) = loaded_app([1]);

    app.navigate(Route::Recommendations { movies: None });

    assert_eq!(app.screen, Screen::Recommendations);
    assert_eq!(
        app.recs.phase,
        RecPhase::Error("No movies selected".to_string())
    );
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn back_to_catalog_keeps_selection_and_drops_late_results() {
    let (mut app, mut rx) = loaded_app(1..=5);
    select_all_on_page(&mut app);
    drain(&mut rx);
    app.update(Action::Submit);
    let generation = match drain(&mut rx).as_slice() {
        [BackendCommand::Recommend { generation, .. }] => *generation,
        other => panic!("unexpected commands {other:?}"),
    };

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Catalog);
    assert_eq!(app.catalog.selection().len(), 5);

    app.handle_backend_event(BackendEvent::RecommendationsLoaded {
        generation,
        result: Ok(Recommendations::default()),
    });
    assert_eq!(app.recs.phase, RecPhase::Idle);
}

// ── Posters ─────────────────────────────────────────────────────

fn poster(movie_id: MovieId) -> PosterHandle {
    PosterHandle::from_image(movie_id, DynamicImage::new_rgb8(2, 2), None)
}

fn last_poster_generation(cmds: &[BackendCommand]) -> u64 {
    cmds.iter()
        .rev()
        .find_map(|cmd| match cmd {
            BackendCommand::FetchPoster { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("no poster request")
}

#[test]
fn stale_poster_is_never_displayed() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    let generation = app.catalog.generation();
    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation,
        result: Ok(page_of([1, 2], 1)),
    });
    let first = last_poster_generation(&drain(&mut rx));

    app.update(Action::MoveDown);
    let second = last_poster_generation(&drain(&mut rx));
    assert_ne!(first, second);

    app.handle_backend_event(BackendEvent::PosterLoaded {
        target: PosterTarget::Catalog,
        generation: first,
        poster: Some(poster(1)),
    });
    assert!(app.catalog_poster.slot().displayed().is_none());

    app.handle_backend_event(BackendEvent::PosterLoaded {
        target: PosterTarget::Catalog,
        generation: second,
        poster: Some(poster(2)),
    });
    assert_eq!(
        app.catalog_poster.slot().displayed().map(|p| p.movie_id()),
        Some(2)
    );
}

#[test]
fn missing_poster_shows_fallback() {
    let (mut app, mut rx) = test_app();
    app.start(Route::Catalog);
    let generation = app.catalog.generation();
    app.handle_backend_event(BackendEvent::CatalogLoaded {
        generation,
        result: Ok(page_of([4], 1)),
    });
    let generation = last_poster_generation(&drain(&mut rx));

    app.handle_backend_event(BackendEvent::PosterLoaded {
        target: PosterTarget::Catalog,
        generation,
        poster: None,
    });

    assert!(app.catalog_poster.slot().is_missing());
}

#[test]
fn release_only_touches_its_own_pane() {
    let (mut app, _rx) = test_app();
    for pane in [&mut app.catalog_poster, &mut app.recs_poster] {
        let generation = pane.show(5).unwrap();
        pane.complete(generation, Some(poster(5)));
        assert!(pane.art(4, 2).is_some());
    }
    app.catalog_poster.show(6);

    app.handle_backend_event(BackendEvent::PosterReleased {
        target: PosterTarget::Catalog,
        movie_id: 5,
    });

    assert!(!app.catalog_poster.has_art(5));
    assert!(app.recs_poster.has_art(5));
}

// ── Overlays ────────────────────────────────────────────────────

#[test]
fn quit_requires_confirmation() {
    let (mut app, _rx) = test_app();

    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);
    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn help_swallows_input() {
    let (mut app, mut rx) = loaded_app([1, 2]);
    app.update(Action::ToggleHelp);
    app.update(Action::ToggleSelect);
    assert!(app.catalog.selection().is_empty());

    app.update(Action::NavigateBack);
    assert!(!app.show_help);
    assert!(drain(&mut rx).is_empty());
}

#[test]
fn resize_leaves_state_alone() {
    let (mut app, mut rx) = loaded_app([1, 2]);
    app.update(Action::ToggleHelp);

    assert!(!app.update(Action::Resize(120, 40)));
    assert!(app.show_help);
    assert_eq!(app.cursor, 0);
    assert!(drain(&mut rx).is_empty());
}
