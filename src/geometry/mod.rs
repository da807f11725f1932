mod point;
mod polygon;

/// 3D point value type.
pub use point::Point;
/// Closed boundary ring value type.
pub use polygon::Polygon;
