// Re-export glam for convenience
pub use glam::*;

// Whit math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// RGB color, linear and unbounded until tone mapping.
pub type Color = Vec3;
