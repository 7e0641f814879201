use tracing::debug;

use crate::error::{Result, VizError};
use crate::mesh::types::{Element, Point};

/// The two independent coordinate axes of a structured grid.
///
/// Points are stored row-major: each row is a contiguous block of
/// `nx + 1` points that differ only in x, and rows follow each other in
/// increasing row index. Order is structural, so the axes are taken from
/// positions in the sequence and never sorted or deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Axes {
    /// Rebuild the axes from the point list.
    ///
    /// The row width comes from the connectivity of the first element: its
    /// third vertex sits directly above its first, so its index is exactly
    /// `nx + 1`. Coordinates are never compared.
    pub fn reconstruct(points: &[Point], elements: &[Element]) -> Result<Self> {
        let first = elements
            .first()
            .ok_or_else(|| VizError::shape("no elements, cannot infer the grid row width"))?;

        let row_width = first.vertices[2];
        if row_width < 2 {
            return Err(VizError::shape(format!(
                "element 0 gives a row width of {} nodes, need at least 2",
                row_width
            )));
        }

        if points.len() % row_width != 0 {
            return Err(VizError::shape(format!(
                "{} points do not split into rows of {} (nx = {})",
                points.len(),
                row_width,
                row_width - 1
            )));
        }

        let rows = points.len() / row_width;
        if rows < 2 {
            return Err(VizError::shape(format!(
                "{} points form only {} row(s) of {}, need at least 2",
                points.len(),
                rows,
                row_width
            )));
        }

        let x: Vec<f64> = points[..row_width].iter().map(|p| p.x).collect();
        let y: Vec<f64> = points.iter().step_by(row_width).map(|p| p.y).collect();

        debug!(nx = x.len() - 1, ny = y.len() - 1, "reconstructed grid axes");
        Ok(Self { x, y })
    }

    /// Column coordinates, `nx + 1` values.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Row coordinates, `ny + 1` values.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of element columns.
    pub fn nx(&self) -> usize {
        self.x.len() - 1
    }

    /// Number of element rows.
    pub fn ny(&self) -> usize {
        self.y.len() - 1
    }

    /// Number of grid nodes, `(nx + 1) * (ny + 1)`.
    pub fn node_count(&self) -> usize {
        self.x.len() * self.y.len()
    }
}
