pub mod colors;
pub mod contour;
pub mod figure;
pub mod render;
pub mod surface;
pub mod types;

pub use figure::Figure;
pub use surface::DrawingSurface;
