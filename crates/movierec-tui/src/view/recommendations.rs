use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use crate::app::App;
use crate::model::recommendations::{RecEntry, RecPhase};
use crate::theme::Theme;
use crate::view::{spinner_char, truncate};

/// Render the recommendations screen into the given area.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect, footer_area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

    let header = Line::from(vec![
        Span::styled(" Recommendations ", app.theme.header_style()),
        Span::styled(
            " Based on your five picks",
            Style::default().fg(app.theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let body = chunks[1];
    match &app.recs.phase {
        RecPhase::Idle | RecPhase::Loading => {
            render_loading(f, body, &app.theme, app.tick);
        }
        RecPhase::Error(message) => {
            render_error(f, body, message, &app.theme);
        }
        RecPhase::Ready(_) => {
            let side_width = (body.width / 3).max(30).min(body.width / 2);
            let columns =
                Layout::horizontal([Constraint::Min(30), Constraint::Length(side_width)])
                    .split(body);
            render_list(f, columns[0], app);
            crate::view::poster::render(f, columns[1], &mut app.recs_poster, &app.theme, app.tick);
        }
    }

    render_footer(f, footer_area, app);
}

fn render_loading(f: &mut Frame, area: Rect, theme: &Theme, tick: usize) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {} Finding movies you might like...", spinner_char(tick)),
            Style::default().fg(theme.spinner),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style()),
        ),
        area,
    );
}

fn render_error(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("  {message}"), theme.error_style())),
        Line::from(""),
        Line::from(Span::styled(
            "  Back to Movie Selection (Esc)",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Error "),
        ),
        area,
    );
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let entries = app.recs.entries();
    let title_width = (area.width as usize).saturating_sub(24).max(10);

    // Section headings are interleaved with the movies; `entry_rows[i]` is the
    // list row of entry `i`.
    let mut items: Vec<ListItem> = Vec::with_capacity(entries.len() + 3);
    let mut entry_rows = Vec::with_capacity(entries.len());
    let mut in_selected = false;

    items.push(section_item("Recommended Movies", theme));
    for entry in &entries {
        if matches!(entry, RecEntry::Selected(_)) && !in_selected {
            in_selected = true;
            items.push(ListItem::new(Line::from("")));
            items.push(section_item("Movies You Selected", theme));
        }
        entry_rows.push(items.len());
        items.push(entry_item(entry, title_width, theme));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.focused_border_style()),
        )
        .highlight_style(theme.highlight_style());

    let mut state = ListState::default();
    state.select(entry_rows.get(app.recs.cursor).copied());
    f.render_stateful_widget(list, area, &mut state);
}

fn section_item<'a>(title: &'a str, theme: &Theme) -> ListItem<'a> {
    ListItem::new(Line::from(Span::styled(
        format!(" {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )))
}

fn entry_item(entry: &RecEntry<'_>, title_width: usize, theme: &Theme) -> ListItem<'static> {
    let movie = entry.movie();
    let mut spans = Vec::with_capacity(4);
    match entry {
        RecEntry::Recommended(rec) => spans.push(Span::styled(
            format!("  {:>4} ", rec.badge()),
            Style::default()
                .fg(theme.score)
                .add_modifier(Modifier::BOLD),
        )),
        RecEntry::Selected(_) => spans.push(Span::styled(
            "     \u{2713} ",
            Style::default().fg(theme.selected),
        )),
    }
    spans.push(Span::styled(
        truncate(&movie.title, title_width),
        Style::default().fg(theme.text),
    ));
    if let Some(year) = &movie.year {
        spans.push(Span::styled(
            format!("  ({year})"),
            Style::default().fg(theme.dim),
        ));
    }
    let genres = movie.genre_list();
    if !genres.is_empty() {
        spans.push(Span::styled(
            format!("  {}", truncate(&genres, 24)),
            Style::default().fg(theme.dim),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.recs.phase {
        RecPhase::Ready(_) => " j/k:move  r:run again  Esc:back to movie selection  ?:help  q:quit",
        RecPhase::Error(_) => " r:retry  Esc:back to movie selection  q:quit",
        _ => " Esc:back to movie selection  q:quit",
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(hints, app.theme.footer_style()))),
        area,
    );
}
