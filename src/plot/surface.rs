use crate::error::Result;
use crate::plot::types::{FilledContour, Polygon};

/// The minimal drawing interface the core logic renders through.
///
/// Implementations accumulate primitives; nothing becomes visible until
/// `request_redraw` is called. Click handlers are not part of it: the
/// terminal front end registers them on `tui::button::ButtonBar`.
pub trait DrawingSurface {
    fn draw_filled_contour(&mut self, contour: FilledContour) -> Result<()>;
    fn draw_filled_polygon(&mut self, polygon: Polygon) -> Result<()>;
    fn request_redraw(&mut self) -> Result<()>;
}

/// Surface that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub contours: Vec<FilledContour>,
    pub polygons: Vec<Polygon>,
    pub redraws: usize,
}

impl DrawingSurface for RecordingSurface {
    fn draw_filled_contour(&mut self, contour: FilledContour) -> Result<()> {
        self.contours.push(contour);
        Ok(())
    }

    fn draw_filled_polygon(&mut self, polygon: Polygon) -> Result<()> {
        self.polygons.push(polygon);
        Ok(())
    }

    fn request_redraw(&mut self) -> Result<()> {
        self.redraws += 1;
        Ok(())
    }
}
