use tracing::info;

use crate::error::{Result, VizError};
use crate::mesh::field::FieldGrid;
use crate::mesh::grid::Axes;
use crate::mesh::types::{Element, Point};

/// Everything loaded from the solver output, built once and read-only
/// afterwards. Renderers and the overlay borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    points: Vec<Point>,
    elements: Vec<Element>,
    axes: Axes,
    field: FieldGrid,
}

impl Scene {
    pub fn new(points: Vec<Point>, elements: Vec<Element>, samples: Vec<f64>) -> Result<Self> {
        let axes = Axes::reconstruct(&points, &elements)?;
        let field = FieldGrid::reshape(&axes, &samples)?;

        for (idx, element) in elements.iter().enumerate() {
            if let Some(&bad) = element.vertices.iter().find(|&&v| v >= points.len()) {
                return Err(VizError::shape(format!(
                    "element {} references node {} but only {} nodes exist",
                    idx,
                    bad,
                    points.len()
                )));
            }
        }

        info!(
            nodes = points.len(),
            elements = elements.len(),
            nx = axes.nx(),
            ny = axes.ny(),
            "scene ready"
        );

        Ok(Self {
            points,
            elements,
            axes,
            field,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn field(&self) -> &FieldGrid {
        &self.field
    }

    /// Corner coordinates of an element in boundary order.
    pub fn quad(&self, element: &Element) -> [(f64, f64); 4] {
        element.boundary().map(|v| {
            let p = self.points[v];
            (p.x, p.y)
        })
    }

    /// Bounding box `(x_min, x_max, y_min, y_max)` over every node. The
    /// contour carries it as the axis limits of the figure.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut b = (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        );
        for p in &self.points {
            b.0 = b.0.min(p.x);
            b.1 = b.1.max(p.x);
            b.2 = b.2.min(p.y);
            b.3 = b.3.max(p.y);
        }
        b
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// 3x3 unit grid, four quads tagged 0..=3, field 0..=8.
    pub fn unit_scene() -> Scene {
        let points = (0..3)
            .flat_map(|j| (0..3).map(move |i| Point::new(i as f64, j as f64)))
            .collect();
        let elements = vec![
            Element::new([0, 1, 3, 4], 0),
            Element::new([1, 2, 4, 5], 1),
            Element::new([3, 4, 6, 7], 2),
            Element::new([4, 5, 7, 8], 3),
        ];
        let samples = (0..9).map(|v| v as f64).collect();
        Scene::new(points, elements, samples).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::unit_scene;
    use super::*;

    #[test]
    fn test_unit_scene() {
        let scene = unit_scene();
        assert_eq!(scene.axes().x(), &[0.0, 1.0, 2.0]);
        assert_eq!(scene.axes().y(), &[0.0, 1.0, 2.0]);
        assert_eq!(scene.field().get(1, 2), Some(5.0));
        assert_eq!(scene.bounds(), (0.0, 2.0, 0.0, 2.0));
    }

    #[test]
    fn test_quad_winding() {
        let scene = unit_scene();
        let quad = scene.quad(&scene.elements()[0]);
        assert_eq!(quad, [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    }

    #[test]
    fn test_vertex_out_of_range() {
        let points = (0..4).map(|i| Point::new((i % 2) as f64, (i / 2) as f64)).collect();
        let elements = vec![Element::new([0, 1, 2, 9], 0)];
        let err = Scene::new(points, elements, vec![0.0; 4]).unwrap_err();
        assert!(matches!(err, VizError::ShapeMismatch(_)), "{}", err);
    }

    #[test]
    fn test_field_mismatch_reported_before_render() {
        let points = (0..4).map(|i| Point::new((i % 2) as f64, (i / 2) as f64)).collect();
        let elements = vec![Element::new([0, 1, 2, 3], 0)];
        let err = Scene::new(points, elements, vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, VizError::ShapeMismatch(_)));
    }
}
