use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use ratatui_image::StatefulImage;
use tracing::{debug, error};

use crate::error::VizError;
use crate::overlay::{MeshOverlay, OverlayCommand};
use crate::plot::types::COLORBAR_TICKS;
use crate::plot::Figure;
use crate::tui::button::{Button, ButtonBar};
use crate::tui::event::is_quit;
use crate::tui::legend::render_legend;
use crate::tui::status::{render_status_bar, StatusInfo};
use crate::tui::theme::Theme;

/// Width of the colorbar legend panel.
const LEGEND_WIDTH: u16 = 16;

pub struct App<'a> {
    pub overlay: MeshOverlay<'a, Figure>,
    pub buttons: ButtonBar,
    pub picker: Option<Picker>,
    pub should_quit: bool,
    /// Fatal handler error; ends the event loop.
    pub failure: Option<VizError>,
    /// Cached image protocol for the current figure generation.
    image_state: Option<StatefulProtocol>,
    image_generation: u64,
}

impl<'a> App<'a> {
    pub fn new(overlay: MeshOverlay<'a, Figure>, picker: Option<Picker>) -> Self {
        let mut buttons = ButtonBar::default();
        buttons.register(Button::new("Mesh", OverlayCommand::ShowMesh));
        Self {
            overlay,
            buttons,
            picker,
            should_quit: false,
            failure: None,
            image_state: None,
            image_generation: 0,
        }
    }

    /// Run an overlay command. Errors are fatal: they stop the loop and are
    /// reported once the terminal is restored.
    pub fn run_command(&mut self, command: OverlayCommand) {
        debug!(?command, "dispatching overlay command");
        if let Err(err) = self.overlay.dispatch(command) {
            error!(%err, ?command, "overlay command failed");
            self.failure = Some(err);
            self.should_quit = true;
        }
    }

    /// Handle a key event. Returns true if the screen should be redrawn.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if is_quit(&key) {
            self.should_quit = true;
            return true;
        }
        match key.code {
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.run_command(OverlayCommand::ShowMesh);
                true
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.run_command(OverlayCommand::Redraw);
                true
            }
            _ => false,
        }
    }

    /// Left click on a registered button runs its command.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return false;
        }
        match self.buttons.hit(mouse.column, mouse.row) {
            Some(command) => {
                self.run_command(command);
                true
            }
            None => false,
        }
    }

    pub fn status_info(&self) -> StatusInfo {
        let scene = self.overlay.scene();
        StatusInfo {
            nx: scene.axes().nx(),
            ny: scene.axes().ny(),
            elements: scene.elements().len(),
            overlay: self.overlay.state(),
            polygons: self.overlay.surface().patches().len(),
        }
    }

    /// Render the full UI.
    pub fn render(&mut self, frame: &mut Frame) {
        let outer = Layout::vertical([
            Constraint::Length(1), // Status bar
            Constraint::Min(5),    // Plot + legend
            Constraint::Length(3), // Hints + buttons
        ])
        .split(frame.area());

        render_status_bar(frame, outer[0], &self.status_info());

        let main = Layout::horizontal([Constraint::Min(10), Constraint::Length(LEGEND_WIDTH)])
            .split(outer[1]);
        self.render_plot(frame, main[0]);
        render_legend(
            frame,
            main[1],
            self.overlay.surface().contour(),
            COLORBAR_TICKS,
        );

        let footer = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(self.buttons.width()),
            Constraint::Length(1),
        ])
        .split(outer[2]);
        self.render_hints(frame, footer[0]);
        self.buttons.render(frame, footer[1]);
    }

    fn render_plot(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_focused())
            .title(" Field ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let figure = self.overlay.surface();
        let Some(rendered) = figure.rendered() else {
            frame.render_widget(
                Paragraph::new(Span::styled("[nothing drawn yet]", Theme::fallback())),
                inner,
            );
            return;
        };

        let Some(picker) = &self.picker else {
            // No picker: describe the figure instead
            let text = format!(
                "[figure {}x{} px, {} mesh polygons; image display requires Kitty/iTerm2/Sixel]",
                rendered.width,
                rendered.height,
                figure.patches().len()
            );
            frame.render_widget(Paragraph::new(Span::styled(text, Theme::fallback())), inner);
            return;
        };

        // Re-create image state whenever the figure was redrawn
        if self.image_state.is_none() || self.image_generation != figure.generation() {
            match image::load_from_memory(&rendered.png_bytes) {
                Ok(dyn_image) => {
                    self.image_state = Some(picker.new_resize_protocol(dyn_image));
                    self.image_generation = figure.generation();
                }
                Err(e) => {
                    let text = format!("[plot decode error: {}]", e);
                    frame.render_widget(Paragraph::new(Span::styled(text, Theme::error())), inner);
                    return;
                }
            }
        }

        if let Some(protocol) = self.image_state.as_mut() {
            let image_widget = StatefulImage::default();
            frame.render_stateful_widget(image_widget, inner, protocol);
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hint = Line::from(vec![
            Span::styled(" m", Theme::button()),
            Span::styled(" show mesh  ", Theme::hint()),
            Span::styled("r", Theme::button()),
            Span::styled(" redraw  ", Theme::hint()),
            Span::styled("q", Theme::button()),
            Span::styled(" quit", Theme::hint()),
        ]);
        let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);
        frame.render_widget(Paragraph::new(hint), rows[1]);
    }
}
