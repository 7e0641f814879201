//! Mesh overlay: element quads filled by region tag, drawn over the contour.

use tracing::{info, warn};

use crate::error::Result;
use crate::mesh::Scene;
use crate::plot::colors::RegionColorMap;
use crate::plot::surface::DrawingSurface;
use crate::plot::types::{Polygon, EDGE_COLOR, EDGE_WIDTH};

/// Commands bound to the overlay buttons/keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    /// Draw every element over the contour.
    ShowMesh,
    /// Redraw without adding geometry.
    Redraw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Hidden,
    Shown,
}

/// Owns the drawing surface and reads the scene.
///
/// `ShowMesh` is not a toggle: every activation appends a full set of
/// element polygons, so activating twice draws each element twice, and
/// `Redraw` never removes anything.
pub struct MeshOverlay<'a, S: DrawingSurface> {
    scene: &'a Scene,
    surface: S,
    colors: RegionColorMap,
    state: OverlayState,
    activations: usize,
}

impl<'a, S: DrawingSurface> MeshOverlay<'a, S> {
    pub fn new(scene: &'a Scene, surface: S) -> Self {
        Self {
            scene,
            surface,
            colors: RegionColorMap,
            state: OverlayState::Hidden,
            activations: 0,
        }
    }

    pub fn scene(&self) -> &'a Scene {
        self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn activations(&self) -> usize {
        self.activations
    }

    /// One polygon per element, corners in `(v0, v1, v3, v2)` order. All
    /// region colors are resolved up front, so an unknown tag fails before
    /// anything is drawn.
    pub fn polygons(&self) -> Result<Vec<Polygon>> {
        self.scene
            .elements()
            .iter()
            .enumerate()
            .map(|(idx, element)| {
                let fill = self.colors.color_for(idx, element.region)?;
                Ok(Polygon {
                    vertices: self.scene.quad(element).to_vec(),
                    fill,
                    edge: EDGE_COLOR,
                    edge_width: EDGE_WIDTH,
                })
            })
            .collect()
    }

    /// Add every element polygon to the surface and redraw. Returns the
    /// number of polygons added.
    pub fn activate(&mut self) -> Result<usize> {
        let polygons = self.polygons()?;
        let count = polygons.len();
        self.activations += 1;
        if self.state == OverlayState::Shown {
            warn!(
                activations = self.activations,
                "mesh overlay drawn again on top of the previous one"
            );
        }
        // State covers the polygons pushed below even if the redraw fails.
        self.state = OverlayState::Shown;
        for polygon in polygons {
            self.surface.draw_filled_polygon(polygon)?;
        }
        self.surface.request_redraw()?;

        info!(polygons = count, activations = self.activations, "mesh overlay drawn");
        Ok(count)
    }

    /// Redraw only.
    pub fn redraw(&mut self) -> Result<()> {
        self.surface.request_redraw()
    }

    pub fn dispatch(&mut self, command: OverlayCommand) -> Result<()> {
        match command {
            OverlayCommand::ShowMesh => self.activate().map(|_| ()),
            OverlayCommand::Redraw => self.redraw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;
    use crate::mesh::scene::fixtures::unit_scene;
    use crate::mesh::{Element, Point};
    use crate::plot::colors::REGION_COLORS;
    use crate::plot::surface::RecordingSurface;

    #[test]
    fn test_activate_draws_one_polygon_per_element() {
        let scene = unit_scene();
        let mut overlay = MeshOverlay::new(&scene, RecordingSurface::default());
        assert_eq!(overlay.state(), OverlayState::Hidden);

        assert_eq!(overlay.activate().unwrap(), 4);
        assert_eq!(overlay.state(), OverlayState::Shown);

        let drawn = &overlay.surface().polygons;
        assert_eq!(drawn.len(), 4);
        let fills: Vec<_> = drawn.iter().map(|p| p.fill).collect();
        assert_eq!(fills, REGION_COLORS.to_vec());
        assert!(drawn.iter().all(|p| p.edge == EDGE_COLOR && p.edge_width == 1));
        assert_eq!(overlay.surface().redraws, 1);
    }

    #[test]
    fn test_winding_is_boundary_order() {
        let scene = unit_scene();
        let overlay = MeshOverlay::new(&scene, RecordingSurface::default());
        let polys = overlay.polygons().unwrap();
        // element 3 is [4, 5, 7, 8]
        assert_eq!(
            polys[3].vertices,
            vec![(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]
        );
    }

    #[test]
    fn test_second_activation_doubles_geometry() {
        let scene = unit_scene();
        let mut overlay = MeshOverlay::new(&scene, RecordingSurface::default());
        overlay.dispatch(OverlayCommand::ShowMesh).unwrap();
        overlay.dispatch(OverlayCommand::ShowMesh).unwrap();
        assert_eq!(overlay.surface().polygons.len(), 8);
        assert_eq!(overlay.activations(), 2);
        assert_eq!(overlay.state(), OverlayState::Shown);
    }

    #[test]
    fn test_redraw_adds_nothing_and_keeps_state() {
        let scene = unit_scene();
        let mut overlay = MeshOverlay::new(&scene, RecordingSurface::default());
        overlay.dispatch(OverlayCommand::Redraw).unwrap();
        assert!(overlay.surface().polygons.is_empty());
        assert_eq!(overlay.state(), OverlayState::Hidden);

        overlay.dispatch(OverlayCommand::ShowMesh).unwrap();
        overlay.dispatch(OverlayCommand::Redraw).unwrap();
        assert_eq!(overlay.surface().polygons.len(), 4);
        assert_eq!(overlay.state(), OverlayState::Shown);
        assert_eq!(overlay.surface().redraws, 3);
    }

    /// Accepts primitives but fails every redraw.
    #[derive(Default)]
    struct BrokenRedraw {
        polygons: usize,
    }

    impl DrawingSurface for BrokenRedraw {
        fn draw_filled_contour(&mut self, _: crate::plot::types::FilledContour) -> Result<()> {
            Ok(())
        }

        fn draw_filled_polygon(&mut self, _: Polygon) -> Result<()> {
            self.polygons += 1;
            Ok(())
        }

        fn request_redraw(&mut self) -> Result<()> {
            Err(VizError::render("backend gone"))
        }
    }

    #[test]
    fn test_failed_redraw_still_counts_activation() {
        let scene = unit_scene();
        let mut overlay = MeshOverlay::new(&scene, BrokenRedraw::default());
        let err = overlay.activate().unwrap_err();
        assert!(matches!(err, VizError::Render(_)));
        assert_eq!(overlay.surface().polygons, 4);
        assert_eq!(overlay.state(), OverlayState::Shown);
        assert_eq!(overlay.activations(), 1);
    }

    #[test]
    fn test_unknown_tag_fails_without_partial_draw() {
        let points = (0..3)
            .flat_map(|j| (0..3).map(move |i| Point::new(i as f64, j as f64)))
            .collect();
        let elements = vec![
            Element::new([0, 1, 3, 4], 0),
            Element::new([1, 2, 4, 5], 1),
            Element::new([3, 4, 6, 7], 4),
            Element::new([4, 5, 7, 8], 3),
        ];
        let scene = Scene::new(points, elements, vec![0.0; 9]).unwrap();
        let mut overlay = MeshOverlay::new(&scene, RecordingSurface::default());

        let err = overlay.activate().unwrap_err();
        assert!(matches!(err, VizError::UnknownRegionTag { element: 2, tag: 4 }));
        assert!(overlay.surface().polygons.is_empty());
        assert_eq!(overlay.surface().redraws, 0);
        assert_eq!(overlay.state(), OverlayState::Hidden);
    }
}
