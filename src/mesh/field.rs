use crate::error::{Result, VizError};
use crate::mesh::grid::Axes;

/// Nodal field samples laid out as `[row][col]` over the grid axes.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    values: Vec<f64>,
    cols: usize,
}

impl FieldGrid {
    /// Reshape the flat sample list, row-major, to `len(y) x len(x)`.
    /// Values are moved, never recomputed.
    pub fn reshape(axes: &Axes, samples: &[f64]) -> Result<Self> {
        let expected = axes.node_count();
        if samples.len() != expected {
            return Err(VizError::shape(format!(
                "{} field samples for a {}x{} node grid ({} expected)",
                samples.len(),
                axes.x().len(),
                axes.y().len(),
                expected
            )));
        }
        Ok(Self {
            values: samples.to_vec(),
            cols: axes.x().len(),
        })
    }

    pub fn rows(&self) -> usize {
        self.values.len() / self.cols
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols)
    }

    /// Smallest and largest finite sample, or `None` if there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::types::{Element, Point};

    fn axes(nx: usize, ny: usize) -> Axes {
        let points: Vec<Point> = (0..=ny)
            .flat_map(|j| (0..=nx).map(move |i| Point::new(i as f64, j as f64)))
            .collect();
        let elements = [Element::new([0, 1, nx + 1, nx + 2], 0)];
        Axes::reconstruct(&points, &elements).unwrap()
    }

    #[test]
    fn test_reshape_3x3() {
        let samples: Vec<f64> = (0..9).map(|v| v as f64).collect();
        let grid = FieldGrid::reshape(&axes(2, 2), &samples).unwrap();
        assert_eq!(
            grid.to_nested(),
            vec![
                vec![0.0, 1.0, 2.0],
                vec![3.0, 4.0, 5.0],
                vec![6.0, 7.0, 8.0]
            ]
        );
    }

    #[test]
    fn test_index_identity() {
        let ax = axes(3, 1);
        let samples = [1e-7, -2.5, 3.25, 0.1, 0.2, 0.30000000000000004, 7.0, 8.0];
        let grid = FieldGrid::reshape(&ax, &samples).unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 4);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let expected = samples[row * ax.x().len() + col];
                assert_eq!(grid.get(row, col).unwrap().to_bits(), expected.to_bits());
            }
        }
        assert_eq!(grid.get(0, 4), None);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_sample_count_mismatch() {
        let err = FieldGrid::reshape(&axes(2, 2), &[0.0; 8]).unwrap_err();
        assert!(matches!(err, VizError::ShapeMismatch(_)));
        let err = FieldGrid::reshape(&axes(2, 2), &[0.0; 10]).unwrap_err();
        assert!(matches!(err, VizError::ShapeMismatch(_)));
    }

    #[test]
    fn test_value_range_skips_nan() {
        let grid = FieldGrid::reshape(&axes(1, 1), &[2.0, f64::NAN, -1.0, 4.0]).unwrap();
        assert_eq!(grid.value_range(), Some((-1.0, 4.0)));
    }
}
