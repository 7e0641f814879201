use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::overlay::OverlayCommand;
use crate::tui::theme::Theme;

/// A clickable label bound to an overlay command. The on-screen rectangle
/// is updated on every render so hit testing follows terminal resizes.
#[derive(Debug, Clone)]
pub struct Button {
    pub label: String,
    pub command: OverlayCommand,
    area: Rect,
}

impl Button {
    pub fn new(label: impl Into<String>, command: OverlayCommand) -> Self {
        Self {
            label: label.into(),
            command,
            area: Rect::default(),
        }
    }

    /// Columns needed to draw the label inside a border.
    pub fn width(&self) -> u16 {
        self.label.chars().count() as u16 + 4
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.width > 0
            && self.area.height > 0
            && column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.area = area;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused());
        frame.render_widget(
            Paragraph::new(self.label.as_str())
                .style(Theme::button())
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, area: Rect) {
        self.area = area;
    }
}

/// Buttons registered with the viewer, dispatched by mouse position.
#[derive(Debug, Default)]
pub struct ButtonBar {
    buttons: Vec<Button>,
}

impl ButtonBar {
    pub fn register(&mut self, button: Button) {
        self.buttons.push(button);
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Total width when laid out side by side.
    pub fn width(&self) -> u16 {
        self.buttons.iter().map(Button::width).sum()
    }

    /// Command of the button under the cursor, if any.
    pub fn hit(&self, column: u16, row: u16) -> Option<OverlayCommand> {
        self.buttons
            .iter()
            .find(|b| b.contains(column, row))
            .map(|b| b.command)
    }

    /// Lay buttons out left to right inside `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut x = area.x;
        for button in &mut self.buttons {
            let w = button.width().min((area.x + area.width).saturating_sub(x));
            let rect = Rect {
                x,
                y: area.y,
                width: w,
                height: area.height,
            };
            button.render(frame, rect);
            x += w;
        }
    }

    #[cfg(test)]
    pub(crate) fn buttons_mut(&mut self) -> &mut [Button] {
        &mut self.buttons
    }
}
