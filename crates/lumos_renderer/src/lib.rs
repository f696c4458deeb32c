//! Lumos Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials. Rows render in parallel, each with its own seeded random
//! stream, so a given seed always produces the same image.

mod camera;
mod error;
mod hittable;
mod material;
mod output;
mod progress;
mod renderer;
mod sphere;
mod world;

pub use camera::Camera;
pub use error::{ConfigError, RenderError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Material, ScatterResult};
pub use output::{save_image, save_png, save_ppm, write_ppm};
pub use progress::Progress;
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, render_row, row_rng,
    sky_gradient, CancelFlag, ImageBuffer, RenderOptions, SHADOW_ACNE_EPSILON,
};
pub use sphere::Sphere;
pub use world::build_world;

/// Re-export common math types from lumos_math
pub use lumos_math::{Color, Interval, Point3, Ray, Vec3};
