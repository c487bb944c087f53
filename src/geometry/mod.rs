/// Geometry layer: the polygon overlay, the square region and the slider
/// domains that drive them.

pub mod controls;
pub mod polygon;
pub mod region;
