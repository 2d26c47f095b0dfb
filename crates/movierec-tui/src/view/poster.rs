use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use movierec_core::PosterState;

use crate::model::poster::PosterPane;
use crate::theme::Theme;
use crate::view::spinner_char;

/// Render a poster pane: the art, a spinner while loading, or the fallback.
pub fn render(f: &mut Frame, area: Rect, pane: &mut PosterPane, theme: &Theme, tick: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Poster ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(lines) = pane.art(inner.width, inner.height) {
        f.render_widget(Paragraph::new(lines.to_vec()), inner);
        return;
    }

    let message = match pane.slot().state() {
        PosterState::Loading => format!("{} Loading poster", spinner_char(tick)),
        PosterState::Missing => "No poster available".to_string(),
        PosterState::Empty | PosterState::Ready(_) => return,
    };

    // Vertically center the one-line message
    let y = inner.y + inner.height / 2;
    let row = Rect {
        y,
        height: 1.min(inner.height),
        ..inner
    };
    f.render_widget(
        Paragraph::new(Line::from(message))
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center),
        row,
    );
}
