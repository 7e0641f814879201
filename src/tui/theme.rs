use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn status_bar() -> Style {
        Style::default()
            .fg(Color::Reset)
            .bg(Color::DarkGray)
    }

    pub fn status_alert() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn legend_title() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn legend_label() -> Style {
        Style::default()
    }

    pub fn fallback() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
