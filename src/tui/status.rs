use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use crate::overlay::OverlayState;
use crate::tui::theme::Theme;

/// What the status bar reports about the loaded scene and overlay.
pub struct StatusInfo {
    pub nx: usize,
    pub ny: usize,
    pub elements: usize,
    pub overlay: OverlayState,
    pub polygons: usize,
}

pub fn status_text(info: &StatusInfo) -> (String, String) {
    let version = env!("CARGO_PKG_VERSION");
    let left = format!(
        " femview v{} | grid {}x{} | {} elements",
        version, info.nx, info.ny, info.elements
    );
    let right = match info.overlay {
        OverlayState::Hidden => "mesh: hidden ".to_string(),
        OverlayState::Shown => format!("mesh: shown ({} polygons) ", info.polygons),
    };
    (left, right)
}

pub fn render_status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let (left_text, right_text) = status_text(info);

    let left = Span::styled(left_text.clone(), Theme::status_bar());
    let right_style = if info.polygons > info.elements {
        Theme::status_alert()
    } else {
        Theme::status_bar()
    };
    let right = Span::styled(right_text.clone(), right_style);

    let width = area.width as usize;
    let padding = width.saturating_sub(left_text.len() + right_text.len());

    let line = Line::from(vec![
        left,
        Span::styled(" ".repeat(padding), Theme::status_bar()),
        right,
    ]);

    frame.render_widget(line, area);
}
