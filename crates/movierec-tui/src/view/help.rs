use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let area = f.area();
    let popup = centered_rect(64, 36, area);

    let lines = vec![
        Line::from(Span::styled(" Keyboard Shortcuts ", theme.header_style())),
        Line::from(""),
        section_header("Catalog", theme),
        key_line("j / \u{2193}", "Move down", theme),
        key_line("k / \u{2191}", "Move up", theme),
        key_line("l / \u{2192}", "Next page", theme),
        key_line("h / \u{2190}", "Previous page", theme),
        key_line("g / G", "First / last page", theme),
        key_line("Space", "Select / deselect movie", theme),
        key_line("/", "Search titles", theme),
        key_line("[ / ]", "Older / newer year", theme),
        key_line("x", "All years", theme),
        key_line("r", "Reload page", theme),
        Line::from(""),
        section_header("Cart", theme),
        key_line("Tab", "Focus cart / movie list", theme),
        key_line("d / Del", "Remove movie from cart", theme),
        key_line("c", "Clear selection", theme),
        key_line("Enter", "Get recommendations (5 selected)", theme),
        Line::from(""),
        section_header("Recommendations", theme),
        key_line("j / k", "Move", theme),
        key_line("r", "Run again", theme),
        key_line("Esc", "Back to movie selection", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<16}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
