use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use movierec_core::{CatalogPhase, MAX_SELECTION, PageLabel};

use crate::app::{App, Focus, InputMode};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the catalog screen into the given area.
/// `footer_area` is a full-width row below the main content.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let has_search = app.input_mode == InputMode::Search || !app.catalog.search().is_empty();

    let mut constraints = vec![Constraint::Length(1)]; // header
    if has_search {
        constraints.push(Constraint::Length(1)); // search bar
    }
    constraints.push(Constraint::Min(5)); // table + side column
    constraints.push(Constraint::Length(1)); // pagination

    let chunks = Layout::vertical(constraints).split(area);
    let mut chunk_idx = 0;

    render_header(f, chunks[chunk_idx], app);
    chunk_idx += 1;

    if has_search {
        render_search_bar(f, chunks[chunk_idx], app);
        chunk_idx += 1;
    }

    let body = chunks[chunk_idx];
    let side_width = (body.width / 3).max(30).min(body.width / 2);
    let columns =
        Layout::horizontal([Constraint::Min(30), Constraint::Length(side_width)]).split(body);
    let cart_height = (MAX_SELECTION as u16 + 3).min(columns[1].height);
    let side = Layout::vertical([Constraint::Min(3), Constraint::Length(cart_height)])
        .split(columns[1]);

    render_table(f, columns[0], app);
    crate::view::poster::render(f, side[0], &mut app.catalog_poster, &app.theme, app.tick);
    crate::view::cart::render(f, side[1], app);

    render_pagination(f, chunks[chunk_idx + 1], app);
    render_footer(f, footer_area, app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let catalog = &app.catalog;

    let mut spans = vec![
        Span::styled(" Movies ", theme.header_style()),
        Span::styled(
            " Select five movies you like",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [year: {}]", app.year_label()),
            Style::default().fg(theme.active),
        ),
    ];

    if catalog.phase() == &CatalogPhase::Ready {
        spans.push(Span::styled(
            format!("  {} movies", catalog.total()),
            Style::default().fg(theme.dim),
        ));
    }
    if catalog.is_loading() {
        spans.push(Span::styled(
            format!("  {} Loading...", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editing = app.input_mode == InputMode::Search;
    let (text, cursor) = if editing {
        (app.search_buffer.as_str(), "\u{2588}")
    } else {
        (app.catalog.search(), "")
    };
    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(text.to_string(), Style::default().fg(theme.text)),
        Span::styled(cursor, Style::default().fg(theme.active)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let catalog = &app.catalog;
    let focused = app.focus == Focus::Movies;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(format!(
            " Page {} of {} ",
            catalog.page(),
            catalog.total_pages().max(1)
        ));

    if let CatalogPhase::Error(message) = catalog.phase() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(format!("  {message}"), theme.error_style())),
            Line::from(Span::styled(
                "  Press r to try again",
                Style::default().fg(theme.dim),
            )),
        ];
        f.render_widget(Paragraph::new(lines).block(block), area);
        return;
    }

    if catalog.movies().is_empty() {
        let message = match catalog.phase() {
            CatalogPhase::Ready => "  No movies found".to_string(),
            _ => format!("  {} Loading movies", spinner_char(app.tick)),
        };
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message,
                Style::default().fg(theme.dim),
            )))
            .block(block),
            area,
        );
        return;
    }

    let header = Row::new(["", "Title", "Year", "Genres"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
    }))
    .height(1);

    let title_width = (area.width as usize).saturating_sub(30).max(10);
    let genre_width = 20;

    let rows: Vec<Row> = catalog
        .movies()
        .iter()
        .map(|movie| {
            let selected = catalog.selection().contains(movie.id);
            let (marker, style) = if selected {
                ("[x]", Style::default().fg(theme.selected))
            } else if catalog.can_toggle(movie.id) {
                ("[ ]", Style::default().fg(theme.text))
            } else {
                ("[ ]", theme.disabled_style())
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(truncate(&movie.title, title_width)),
                Cell::from(movie.year.clone().unwrap_or_default()),
                Cell::from(truncate(&movie.genre_list(), genre_width))
                    .style(Style::default().fg(theme.dim)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(6),
        Constraint::Length(genre_width as u16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(if focused {
            theme.highlight_style()
        } else {
            Style::default()
        });

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_pagination(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let catalog = &app.catalog;
    if catalog.total_pages() == 0 {
        return;
    }

    let mut spans = vec![Span::styled(
        " \u{2039} Prev ",
        nav_style(catalog.has_prev(), theme),
    )];
    for label in catalog.page_labels() {
        let style = match label {
            PageLabel::Page(n) if n == catalog.page() => theme.header_style(),
            PageLabel::Page(_) => Style::default().fg(theme.text),
            PageLabel::Ellipsis => Style::default().fg(theme.dim),
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {label} "), style));
    }
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        " Next \u{203A} ",
        nav_style(catalog.has_next(), theme),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}

fn nav_style(enabled: bool, theme: &Theme) -> Style {
    if enabled {
        Style::default().fg(theme.active)
    } else {
        theme.disabled_style()
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let hints = match (&app.input_mode, app.focus) {
        (InputMode::Search, _) => " type to search  Enter:apply  Esc:cancel",
        (_, Focus::Cart) => " j/k:move  d:remove  c:clear  Enter:recommend  Tab/Esc:back  ?:help",
        (_, Focus::Movies) => {
            " Space:select  h/l:page  /:search  [ ]:year  x:all years  Tab:cart  Enter:recommend  ?:help  q:quit"
        }
    };

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, theme.footer_style()))),
        area,
    );
}
