use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use movierec_core::MAX_SELECTION;

use crate::app::{App, Focus};
use crate::view::truncate;

/// Render the selection cart: selected titles plus the recommendations button.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let selection = app.catalog.selection();
    let focused = app.focus == Focus::Cart;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if focused {
            theme.focused_border_style()
        } else {
            theme.border_style()
        })
        .title(format!(
            " Selected  {}/{} selected ",
            selection.len(),
            MAX_SELECTION
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    if selection.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " No movies selected",
                Style::default().fg(theme.dim),
            ))),
            chunks[0],
        );
    } else {
        let width = (chunks[0].width as usize).saturating_sub(5);
        let items: Vec<ListItem> = selection
            .movies()
            .iter()
            .enumerate()
            .map(|(i, m)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!(" {}. ", i + 1), Style::default().fg(theme.dim)),
                    Span::styled(truncate(&m.title, width), Style::default().fg(theme.text)),
                ]))
            })
            .collect();

        let list = List::new(items).highlight_style(theme.highlight_style());
        let mut state = ListState::default();
        if focused {
            state.select(Some(app.cart_cursor));
        }
        f.render_stateful_widget(list, chunks[0], &mut state);
    }

    let button = Line::from(Span::styled(
        format!(" {} ", selection.action_label()),
        theme.button_style(selection.is_full()),
    ));
    f.render_widget(Paragraph::new(button).centered(), chunks[1]);
}
