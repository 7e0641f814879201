use tracing::debug;

use crate::error::Result;
use crate::plot::render::render_figure;
use crate::plot::surface::DrawingSurface;
use crate::plot::types::{FilledContour, Polygon, RenderedPlot};

/// Retained-mode figure: one contour layer plus an append-only list of
/// patches. Each redraw rasterizes everything and bumps the generation so
/// the display knows to reload the picture.
#[derive(Debug)]
pub struct Figure {
    width: u32,
    height: u32,
    contour: Option<FilledContour>,
    patches: Vec<Polygon>,
    rendered: Option<RenderedPlot>,
    generation: u64,
}

impl Figure {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            contour: None,
            patches: Vec::new(),
            rendered: None,
            generation: 0,
        }
    }

    pub fn contour(&self) -> Option<&FilledContour> {
        self.contour.as_ref()
    }

    pub fn patches(&self) -> &[Polygon] {
        &self.patches
    }

    /// Last rasterized image, if any redraw has happened.
    pub fn rendered(&self) -> Option<&RenderedPlot> {
        self.rendered.as_ref()
    }

    /// Number of completed redraws.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl DrawingSurface for Figure {
    fn draw_filled_contour(&mut self, contour: FilledContour) -> Result<()> {
        self.contour = Some(contour);
        Ok(())
    }

    fn draw_filled_polygon(&mut self, polygon: Polygon) -> Result<()> {
        self.patches.push(polygon);
        Ok(())
    }

    fn request_redraw(&mut self) -> Result<()> {
        let rendered = render_figure(self.contour.as_ref(), &self.patches, self.width, self.height)?;
        self.rendered = Some(rendered);
        self.generation += 1;
        debug!(
            generation = self.generation,
            patches = self.patches.len(),
            "figure redrawn"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::scene::fixtures::unit_scene;
    use crate::plot::contour::render_contour;

    #[test]
    fn test_redraw_updates_image_and_generation() {
        let mut figure = Figure::new(200, 150);
        assert!(figure.rendered().is_none());
        render_contour(&unit_scene(), &mut figure).unwrap();
        assert_eq!(figure.generation(), 1);
        let png = &figure.rendered().unwrap().png_bytes;
        assert_eq!(&png[1..4], b"PNG");
        figure.request_redraw().unwrap();
        assert_eq!(figure.generation(), 2);
    }

    #[test]
    fn test_oversized_figure_fails_without_panic() {
        let mut figure = Figure::new(70000, 70000);
        let err = render_contour(&unit_scene(), &mut figure).unwrap_err();
        assert!(matches!(err, crate::error::VizError::Render(_)), "{}", err);
        assert!(figure.rendered().is_none());
        assert_eq!(figure.generation(), 0);
    }

    #[test]
    fn test_contour_replaced_patches_appended() {
        let scene = unit_scene();
        let mut figure = Figure::new(100, 100);
        render_contour(&scene, &mut figure).unwrap();
        render_contour(&scene, &mut figure).unwrap();
        assert!(figure.contour().is_some());
        assert!(figure.patches().is_empty());
    }
}
