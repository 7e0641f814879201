//! Drawable primitives handed to a `DrawingSurface`, and rendered output.

use plotters::style::RGBColor;

use crate::plot::colors::{format_sci, jet};

/// Number of filled bands in the contour.
pub const CONTOUR_LEVELS: usize = 100;
/// Colorbar ticks listed next to the plot.
pub const COLORBAR_TICKS: usize = 6;
/// Mesh overlay edge.
pub const EDGE_COLOR: RGBColor = RGBColor(0, 0, 0);
pub const EDGE_WIDTH: u32 = 1;
/// Largest figure side in pixels.
pub const MAX_PLOT_SIDE: u32 = 8192;

/// A filled contour over a coordinate mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledContour {
    /// Node x coordinates, `[row][col]`.
    pub xx: Vec<Vec<f64>>,
    /// Node y coordinates, `[row][col]`.
    pub yy: Vec<Vec<f64>>,
    /// Field values, `[row][col]`.
    pub zz: Vec<Vec<f64>>,
    /// Band boundaries, strictly increasing, `CONTOUR_LEVELS + 1` values.
    pub levels: Vec<f64>,
    /// Axis limits `(x_min, x_max, y_min, y_max)` covering every mesh node.
    pub extent: Option<(f64, f64, f64, f64)>,
}

impl FilledContour {
    pub fn bands(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Band containing `z`. Values on the top boundary fall in the last band;
    /// values outside the level range are clamped. NaN has no band.
    pub fn band_of(&self, z: f64) -> Option<usize> {
        if z.is_nan() || self.bands() == 0 {
            return None;
        }
        let upper = self.levels.partition_point(|&l| l <= z);
        Some(upper.saturating_sub(1).min(self.bands() - 1))
    }

    pub fn band_color(&self, band: usize) -> RGBColor {
        let bands = self.bands().max(1);
        jet((band as f64 + 0.5) / bands as f64)
    }

    pub fn value_range(&self) -> (f64, f64) {
        match (self.levels.first(), self.levels.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (0.0, 0.0),
        }
    }

    /// Evenly spaced colorbar ticks with `%.0e` labels, bottom to top.
    pub fn colorbar_ticks(&self, count: usize) -> Vec<(f64, String)> {
        let (lo, hi) = self.value_range();
        if count < 2 {
            return vec![(lo, format_sci(lo))];
        }
        (0..count)
            .map(|i| {
                let v = lo + (hi - lo) * i as f64 / (count - 1) as f64;
                (v, format_sci(v))
            })
            .collect()
    }
}

/// A filled, outlined polygon in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<(f64, f64)>,
    pub fill: RGBColor,
    pub edge: RGBColor,
    pub edge_width: u32,
}

/// A rendered figure image.
#[derive(Debug, Clone)]
pub struct RenderedPlot {
    pub png_bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}
