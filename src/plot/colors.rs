//! Color scales and the fixed region palette.

use plotters::style::RGBColor;

use crate::error::{Result, VizError};

/// Region tags that have a color.
pub const REGION_TAGS: [i64; 4] = [0, 1, 2, 3];

/// Fill colors per region tag: lightblue, blue, red, lime.
pub const REGION_COLORS: [RGBColor; 4] = [
    RGBColor(173, 216, 230),
    RGBColor(0, 0, 255),
    RGBColor(255, 0, 0),
    RGBColor(0, 255, 0),
];

/// Fixed mapping from region tag to fill color, total over `REGION_TAGS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionColorMap;

impl RegionColorMap {
    /// Color for `tag`. Any tag outside the declared set is an error;
    /// `element` is only used for the diagnostic.
    pub fn color_for(&self, element: usize, tag: i64) -> Result<RGBColor> {
        REGION_TAGS
            .iter()
            .position(|&t| t == tag)
            .map(|i| REGION_COLORS[i])
            .ok_or(VizError::UnknownRegionTag { element, tag })
    }
}

/// Classic jet ramp: blue, cyan, yellow, red. `t` is clamped to `[0, 1]`.
pub fn jet(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    let r = (1.5 - 4.0 * (t - 0.75).abs()).clamp(0.0, 1.0);
    let g = (1.5 - 4.0 * (t - 0.5).abs()).clamp(0.0, 1.0);
    let b = (1.5 - 4.0 * (t - 0.25).abs()).clamp(0.0, 1.0);

    RGBColor(
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}

/// Format like C `%.0e`: one significant digit, signed two-digit exponent.
pub fn format_sci(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let rust = format!("{:.0e}", value);
    match rust.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        None => rust,
    }
}
