//! Figure rasterization: contour + mesh patches → PNG bytes via plotters.

use crate::error::{Result, VizError};
use crate::plot::types::{FilledContour, Polygon, RenderedPlot, MAX_PLOT_SIDE};
use image::codecs::png::PngEncoder;
use image::ImageEncoder;
use plotters::prelude::*;

/// Background color.
const BG_COLOR: RGBColor = RGBColor(255, 255, 255);
/// Axes frame color.
const AXIS_COLOR: RGBColor = RGBColor(40, 40, 40);
/// Horizontal pixels reserved for the colorbar strip.
const COLORBAR_WIDTH: i32 = 70;
/// Interpolated samples per axis across the whole contour.
const CONTOUR_SAMPLES: usize = 240;

/// Rasterize a figure to PNG.
pub fn render_figure(
    contour: Option<&FilledContour>,
    patches: &[Polygon],
    width: u32,
    height: u32,
) -> Result<RenderedPlot> {
    let mut buf = vec![0u8; rgb_buffer_len(width, height)?];

    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&BG_COLOR)
            .map_err(|e| VizError::render(format!("fill: {}", e)))?;

        let split = (width as i32 - COLORBAR_WIDTH).max(1);
        let (plot_area, bar_area) = root.split_horizontally(split);

        let (x_min, x_max, y_min, y_max) = figure_bounds(contour, patches);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(20)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| VizError::render(format!("chart build: {}", e)))?;

        if let Some(contour) = contour {
            chart
                .draw_series(contour_cells(contour))
                .map_err(|e| VizError::render(format!("draw contour: {}", e)))?;
        }

        chart
            .draw_series(
                patches
                    .iter()
                    .map(|p| plotters::element::Polygon::new(p.vertices.clone(), p.fill.filled())),
            )
            .map_err(|e| VizError::render(format!("draw patches: {}", e)))?;

        chart
            .draw_series(patches.iter().map(|p| {
                let mut outline = p.vertices.clone();
                if let Some(&first) = p.vertices.first() {
                    outline.push(first);
                }
                PathElement::new(outline, p.edge.stroke_width(p.edge_width))
            }))
            .map_err(|e| VizError::render(format!("draw edges: {}", e)))?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x_min, y_min), (x_max, y_max)],
                AXIS_COLOR.stroke_width(1),
            )))
            .map_err(|e| VizError::render(format!("frame: {}", e)))?;

        if let Some(contour) = contour {
            draw_colorbar(&bar_area, contour)?;
        }

        root.present()
            .map_err(|e| VizError::render(format!("present: {}", e)))?;
    }

    let png_bytes = encode_rgb_to_png(&buf, width, height)?;

    Ok(RenderedPlot {
        png_bytes,
        width,
        height,
    })
}

/// Bytes needed for a `width x height` RGB buffer. Sides must be within
/// `1..=MAX_PLOT_SIDE`.
fn rgb_buffer_len(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 || width > MAX_PLOT_SIDE || height > MAX_PLOT_SIDE {
        return Err(VizError::render(format!(
            "figure size {}x{} px is outside 1..={} per side",
            width, height, MAX_PLOT_SIDE
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(3))
        .ok_or_else(|| VizError::render(format!("figure size {}x{} px overflows", width, height)))
}

/// Vertical strip of band colors, lowest value at the bottom.
fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    contour: &FilledContour,
) -> Result<()> {
    let (lo, hi) = contour.value_range();
    let mut bar = ChartBuilder::on(area)
        .margin_top(20)
        .margin_bottom(20)
        .margin_left(10)
        .margin_right(30)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(|e| VizError::render(format!("colorbar build: {}", e)))?;

    bar.draw_series(contour.levels.windows(2).enumerate().map(|(band, w)| {
        Rectangle::new([(0.0, w[0]), (1.0, w[1])], contour.band_color(band).filled())
    }))
    .map_err(|e| VizError::render(format!("colorbar: {}", e)))?;

    bar.draw_series(std::iter::once(Rectangle::new(
        [(0.0, lo), (1.0, hi)],
        AXIS_COLOR.stroke_width(1),
    )))
    .map_err(|e| VizError::render(format!("colorbar frame: {}", e)))?;

    Ok(())
}

/// Filled sub-rectangles approximating the banded contour. Each grid cell
/// is subdivided and every piece takes the band of the bilinear value at
/// its center.
fn contour_cells(contour: &FilledContour) -> Vec<Rectangle<(f64, f64)>> {
    let rows = contour.zz.len();
    let cols = contour.zz.first().map_or(0, |r| r.len());
    if rows < 2 || cols < 2 {
        return Vec::new();
    }

    let cells_per_axis = (rows - 1).max(cols - 1);
    let n = (CONTOUR_SAMPLES / cells_per_axis).max(1);
    let mut out = Vec::with_capacity((rows - 1) * (cols - 1) * n * n);

    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            let corner = |m: &Vec<Vec<f64>>| [m[r][c], m[r][c + 1], m[r + 1][c], m[r + 1][c + 1]];
            let (x, y, z) = (corner(&contour.xx), corner(&contour.yy), corner(&contour.zz));

            for i in 0..n {
                for j in 0..n {
                    let (u0, u1) = (i as f64 / n as f64, (i + 1) as f64 / n as f64);
                    let (v0, v1) = (j as f64 / n as f64, (j + 1) as f64 / n as f64);
                    let value = bilerp(&z, (u0 + u1) / 2.0, (v0 + v1) / 2.0);
                    let Some(band) = contour.band_of(value) else {
                        continue;
                    };
                    let a = (bilerp(&x, u0, v0), bilerp(&y, u0, v0));
                    let b = (bilerp(&x, u1, v1), bilerp(&y, u1, v1));
                    out.push(Rectangle::new([a, b], contour.band_color(band).filled()));
                }
            }
        }
    }
    out
}

/// Bilinear interpolation over corners `[00, 01, 10, 11]`, `u` along the
/// column direction and `v` along the row direction.
fn bilerp(k: &[f64; 4], u: f64, v: f64) -> f64 {
    (1.0 - u) * (1.0 - v) * k[0] + u * (1.0 - v) * k[1] + (1.0 - u) * v * k[2] + u * v * k[3]
}

/// Data extent covering the contour, its mesh extent and every patch,
/// never empty.
fn figure_bounds(contour: Option<&FilledContour>, patches: &[Polygon]) -> (f64, f64, f64, f64) {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    if let Some(c) = contour {
        xs.extend(c.xx.iter().flatten());
        ys.extend(c.yy.iter().flatten());
        if let Some((x_min, x_max, y_min, y_max)) = c.extent {
            xs.extend([x_min, x_max]);
            ys.extend([y_min, y_max]);
        }
    }
    for p in patches {
        xs.extend(p.vertices.iter().map(|v| v.0));
        ys.extend(p.vertices.iter().map(|v| v.1));
    }
    let (x_min, x_max) = padded_range(&xs);
    let (y_min, y_max) = padded_range(&ys);
    (x_min, x_max, y_min, y_max)
}

fn padded_range(values: &[f64]) -> (f64, f64) {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < 1e-300 {
        return (lo - 1.0, hi + 1.0);
    }
    (lo, hi)
}

/// Encode a raw RGB pixel buffer to PNG.
fn encode_rgb_to_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    encoder
        .write_image(rgb, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| VizError::render(format!("PNG encode: {}", e)))?;
    Ok(png)
}
