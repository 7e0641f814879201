//! Mesh node and element records as read from the solver output.

/// A node of the 2D domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A quadrilateral cell. Vertices are listed row-then-column:
/// `v0` bottom-left, `v1` bottom-right, `v2` top-left, `v3` top-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub vertices: [usize; 4],
    /// Material/zone number. Interpreted only when the overlay is drawn.
    pub region: i64,
}

impl Element {
    pub fn new(vertices: [usize; 4], region: i64) -> Self {
        Self { vertices, region }
    }

    /// Vertex indices in boundary order. The stored order crosses the
    /// diagonal, so the last two are swapped.
    pub fn boundary(&self) -> [usize; 4] {
        let [v0, v1, v2, v3] = self.vertices;
        [v0, v1, v3, v2]
    }
}
