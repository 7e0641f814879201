//! Structured-grid reconstruction from flat node/element/field sequences.

pub mod field;
pub mod grid;
pub mod scene;
pub mod types;

pub use field::FieldGrid;
pub use grid::Axes;
pub use scene::Scene;
pub use types::{Element, Point};
