use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct Theme {
    pub name: &'static str,

    pub selected: Color,
    pub score: Color,
    pub error: Color,

    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Default theme for dark terminals.
    pub fn dark() -> Self {
        Self {
            name: "dark",

            selected: Color::Rgb(80, 220, 120),
            score: Color::Rgb(255, 200, 0),
            error: Color::Rgb(255, 80, 80),

            header_fg: Color::White,
            header_bg: Color::Rgb(120, 40, 140),
            border: Color::Rgb(70, 70, 90),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            highlight_bg: Color::Rgb(45, 35, 70),
            active: Color::Rgb(190, 120, 255),
            spinner: Color::Rgb(190, 120, 255),
            footer_fg: Color::Rgb(120, 120, 140),
            footer_bg: Color::Reset,
        }
    }

    /// Dark text on light terminals.
    pub fn light() -> Self {
        Self {
            name: "light",

            selected: Color::Rgb(0, 130, 50),
            score: Color::Rgb(170, 100, 0),
            error: Color::Rgb(190, 0, 0),

            header_fg: Color::White,
            header_bg: Color::Rgb(90, 30, 120),
            border: Color::Rgb(170, 170, 185),
            text: Color::Black,
            dim: Color::Rgb(110, 110, 120),
            highlight_bg: Color::Rgb(225, 215, 245),
            active: Color::Rgb(110, 40, 170),
            spinner: Color::Rgb(110, 40, 170),
            footer_fg: Color::Rgb(110, 110, 120),
            footer_bg: Color::Reset,
        }
    }

    /// Theme by name; unknown names fall back to `dark`.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.active)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::DIM)
    }

    /// Style for a button that may be disabled.
    pub fn button_style(&self, enabled: bool) -> Style {
        if enabled {
            Style::default()
                .fg(self.header_fg)
                .bg(self.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim).bg(self.highlight_bg)
        }
    }
}
