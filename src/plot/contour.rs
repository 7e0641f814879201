use tracing::debug;

use crate::error::{Result, VizError};
use crate::mesh::Scene;
use crate::plot::surface::DrawingSurface;
use crate::plot::types::{FilledContour, CONTOUR_LEVELS};

/// Coordinate matrices for the Cartesian product of two axes:
/// `xx[r][c] = x[c]`, `yy[r][c] = y[r]`.
pub fn meshgrid(x: &[f64], y: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let xx = y.iter().map(|_| x.to_vec()).collect();
    let yy = y.iter().map(|&yv| vec![yv; x.len()]).collect();
    (xx, yy)
}

/// `bands + 1` evenly spaced boundaries from `min` to `max`. A flat field
/// gets a nominal unit spread so the boundaries stay strictly increasing.
pub fn contour_levels(min: f64, max: f64, bands: usize) -> Vec<f64> {
    let (lo, hi) = if max > min { (min, max) } else { (min - 1.0, min + 1.0) };
    let bands = bands.max(1);
    (0..=bands)
        .map(|i| {
            if i == bands {
                hi
            } else {
                lo + (hi - lo) * i as f64 / bands as f64
            }
        })
        .collect()
}

/// Filled contour of the scene's field with the fixed level count.
pub fn build_contour(scene: &Scene) -> Result<FilledContour> {
    let (min, max) = scene
        .field()
        .value_range()
        .ok_or_else(|| VizError::render("field has no finite samples to contour"))?;
    let (xx, yy) = meshgrid(scene.axes().x(), scene.axes().y());
    Ok(FilledContour {
        xx,
        yy,
        zz: scene.field().to_nested(),
        levels: contour_levels(min, max, CONTOUR_LEVELS),
        extent: Some(scene.bounds()),
    })
}

/// One-shot initial render: the contour, then a redraw.
pub fn render_contour<S: DrawingSurface + ?Sized>(scene: &Scene, surface: &mut S) -> Result<()> {
    let contour = build_contour(scene)?;
    let (lo, hi) = contour.value_range();
    debug!(levels = contour.bands(), min = lo, max = hi, "drawing filled contour");
    surface.draw_filled_contour(contour)?;
    surface.request_redraw()
}
