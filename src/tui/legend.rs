use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::plot::colors::jet;
use crate::plot::types::FilledContour;
use crate::tui::theme::Theme;

/// Colorbar tick lines, highest value first, each with a swatch in the
/// band color at that value.
pub fn legend_lines(contour: &FilledContour, ticks: usize, rows: usize) -> Vec<Line<'static>> {
    let ticks = contour.colorbar_ticks(ticks);
    if ticks.is_empty() || rows == 0 {
        return Vec::new();
    }
    let (lo, hi) = contour.value_range();
    let span = if hi > lo { hi - lo } else { 1.0 };

    // Spread ticks over the available rows, top = max.
    let mut lines = vec![Line::from(""); rows.max(ticks.len())];
    let last_row = lines.len() - 1;
    let last_tick = (ticks.len() - 1).max(1);
    for (i, (value, label)) in ticks.iter().rev().enumerate() {
        let row = if ticks.len() == 1 { 0 } else { i * last_row / last_tick };
        let rgb = jet((value - lo) / span);
        lines[row] = Line::from(vec![
            Span::styled("██ ", Style::default().fg(Color::Rgb(rgb.0, rgb.1, rgb.2))),
            Span::styled(label.clone(), Theme::legend_label()),
        ]);
    }
    lines
}

pub fn render_legend(frame: &mut Frame, area: Rect, contour: Option<&FilledContour>, ticks: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border())
        .title(Span::styled(" field ", Theme::legend_title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(contour) = contour {
        let lines = legend_lines(contour, ticks, inner.height as usize);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
