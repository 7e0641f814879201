//! Post-processing viewer for 2D finite-element results on structured
//! quadrilateral meshes: filled field contour plus a region-colored mesh
//! overlay, shown in the terminal.

pub mod error;
pub mod input;
pub mod logging;
pub mod mesh;
pub mod overlay;
pub mod persistence;
pub mod plot;
pub mod tui;

pub use error::{Result, VizError};
