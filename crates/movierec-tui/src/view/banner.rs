use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the one-row title bar and return the area below it.
pub fn render_title_bar(f: &mut Frame, area: Rect, app: &App) -> Rect {
    if area.height == 0 {
        return area;
    }
    let bar = Rect { height: 1, ..area };
    let theme = &app.theme;

    let line = Line::from(vec![
        Span::styled(" movierec ", theme.header_style()),
        Span::styled(
            format!(" {} ", app.current_route()),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!(" {}", app.api_url),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), bar);

    Rect {
        y: area.y + 1,
        height: area.height - 1,
        ..area
    }
}
