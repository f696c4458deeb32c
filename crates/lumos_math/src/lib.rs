// Re-export glam for convenience
pub use glam::*;

// Lumos math types
mod interval;
mod ray;
pub mod random;
mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{reflect, refract, Color, Point3, Vec3Ext, NEAR_ZERO_EPSILON};
