//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with configurable depth
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - Row-parallel rendering with one seeded random stream per row

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::{Camera, Color, Hittable, Progress, RenderError};
use lumos_math::{Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Minimum hit distance for bounce rays, so a surface doesn't re-hit itself
/// through rounding error ("shadow acne").
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Output channels are clamped here before scaling to 0-255.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Shared flag for cooperative cancellation, checked before each row.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every render holding a clone of this flag to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Render options that don't change the scene or camera.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Base seed; the image is a pure function of scene, camera and seed
    pub seed: u64,
    /// Worker threads. `None` uses rayon's global pool, `Some(1)` renders
    /// on a single thread.
    pub threads: Option<usize>,
    /// Checked before each row
    pub cancel: CancelFlag,
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It follows the ray through
/// the scene, bouncing off surfaces and accumulating attenuation, until the
/// ray escapes to the sky, is absorbed, or runs out of depth. Bounces are
/// iterated, so stack use does not grow with `depth`.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Ray was absorbed
            None => return Color::ZERO,
        }
    }

    // Out of bounces, no light gathered
    Color::ZERO
}

/// Compute sky gradient background: white at the horizon and below,
/// blending to sky blue straight up.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let channel = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average of `samples_per_pixel` path samples (linear, before
/// gamma).
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    pixel_color * camera.samples_scale()
}

/// Render row `j`, left to right.
pub fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    j: u32,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    (0..camera.image_width)
        .map(|i| render_pixel(camera, world, i, j, rng))
        .collect()
}

/// The random stream for one row of a render with the given seed.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(seed ^ (row as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Image buffer of averaged linear colors, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to gamma-corrected RGB bytes (for display or saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgb(*c)).collect()
    }
}

/// Render the entire scene to an image buffer.
///
/// Rows are rendered in parallel; each row draws from its own
/// [`row_rng`], so the result does not depend on thread count or
/// scheduling.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    options: &RenderOptions,
) -> Result<ImageBuffer, RenderError> {
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width,
        camera.image_height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();
    let progress = Progress::new(camera.image_height);

    let rows = match options.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
            log::debug!("Using a dedicated pool of {} threads", pool.current_num_threads());
            pool.install(|| render_rows(camera, world, options, &progress))
        }
        None => render_rows(camera, world, options, &progress),
    };

    let rows = match rows {
        Ok(rows) => rows,
        Err(err) => {
            log::warn!(
                "Render stopped after {} of {} rows ({:.1}%): {}",
                progress.get_raw(),
                camera.image_height,
                100.0 * progress.get(),
                err
            );
            return Err(err);
        }
    };

    let image = ImageBuffer {
        width: camera.image_width,
        height: camera.image_height,
        pixels: rows.into_iter().flatten().collect(),
    };

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

fn render_rows(
    camera: &Camera,
    world: &dyn Hittable,
    options: &RenderOptions,
    progress: &Progress,
) -> Result<Vec<Vec<Color>>, RenderError> {
    (0..camera.image_height)
        .into_par_iter()
        .map(|j| {
            if options.cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }
            let mut rng = row_rng(options.seed, j);
            let row = render_row(camera, world, j, &mut rng);
            progress.inc();
            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_world, write_ppm, HittableList, Material, Sphere, Vec3};
    use lumos_core::presets::ground_and_sphere;
    use lumos_core::CameraSettings;

    fn small_camera(settings: &CameraSettings, width: u32, spp: u32, depth: u32) -> Camera {
        Camera::new(&CameraSettings {
            image_width: width,
            aspect_ratio: 1.0,
            samples_per_pixel: spp,
            max_depth: depth,
            ..settings.clone()
        })
        .unwrap()
    }

    fn expected_sky(direction: Vec3) -> Color {
        let y = direction.normalize().y;
        let a = 0.5 * (y + 1.0);
        Color::new(1.0 - 0.5 * a, 1.0 - 0.3 * a, 1.0)
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);

        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Y));
        assert!((down - Color::ONE).length() < 1e-6);

        let horizon = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::NEG_Z));
        assert!((horizon - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, -0.5, 0.0)), [128, 0, 0]);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = build_world(&ground_and_sphere()).unwrap();
        let mut rng = row_rng(0, 0);

        for direction in [Vec3::NEG_Z, Vec3::Y, Vec3::NEG_Y] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
        }
        let empty = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &empty, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = HittableList::new();
        let mut rng = row_rng(0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.4, -1.0));

        let color = ray_color(&ray, &world, 10, &mut rng);
        assert!((color - expected_sky(ray.direction())).length() < 1e-6);
    }

    #[test]
    fn test_absent_material_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Arc::new(Material::Absent)).unwrap(),
        ));
        let mut rng = row_rng(0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(ray_color(&ray, &world, 10, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_diffuse_bounce_is_attenuated_sky() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(
                Vec3::new(0.0, 0.0, -1.0),
                0.5,
                Arc::new(Material::lambertian(Color::splat(0.5))),
            )
            .unwrap(),
        ));
        let mut rng = row_rng(3, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        // A single bounce off a lone sphere always escapes to the sky
        for _ in 0..100 {
            let color = ray_color(&ray, &world, 2, &mut rng);
            assert!(color.max_element() <= 0.5 + 1e-6);
            assert!(color.min_element() >= 0.25 - 1e-6);
        }
    }

    #[test]
    fn test_deep_mirror_enclosure_does_not_overflow() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(Vec3::ZERO, 5.0, Arc::new(Material::metal(Color::splat(0.9), 0.0)))
                .unwrap(),
        ));
        let depth = 200_000;

        // Light bounces back and forth inside the mirror until depth runs out
        let mut rng = row_rng(0, 0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(ray_color(&ray, &world, depth, &mut rng).length() < 1e-6);

        let camera = Camera::new(&CameraSettings {
            image_width: 1,
            aspect_ratio: 1.0,
            samples_per_pixel: 1,
            max_depth: depth,
            ..Default::default()
        })
        .unwrap();
        let options = RenderOptions {
            threads: Some(1),
            ..Default::default()
        };
        let image = render(&camera, &world, &options).unwrap();
        assert!(image.get(0, 0).length() < 1e-6);
    }

    #[test]
    fn test_throughput_multiplies_per_bounce() {
        let mut world = HittableList::new();
        world.add(Box::new(
            Sphere::new(
                Vec3::new(0.0, 0.0, -2.0),
                0.5,
                Arc::new(Material::metal(Color::new(0.5, 0.8, 1.0), 0.0)),
            )
            .unwrap(),
        ));
        let mut rng = row_rng(0, 0);

        // Straight back off the mirror into the sky behind the camera
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let expected = Color::new(0.5, 0.8, 1.0) * expected_sky(Vec3::Z);
        let color = ray_color(&ray, &world, 2, &mut rng);
        assert!((color - expected).length() < 1e-5);

        // One bounce allowed: the hit uses it up and nothing is gathered
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_top_rows_see_the_sky() {
        let scene = ground_and_sphere();
        let world = build_world(&scene).unwrap();
        let camera = small_camera(&scene.camera, 20, 1, 1);
        let options = RenderOptions {
            seed: 17,
            ..Default::default()
        };
        let image = render(&camera, &world, &options).unwrap();
        assert_eq!((image.width, image.height), (20, 20));

        let center = camera.image_width / 2;
        for j in 0..3 {
            // Replay the row's random stream up to the center column
            let mut rng = row_rng(options.seed, j);
            for i in 0..center {
                render_pixel(&camera, &world, i, j, &mut rng);
            }
            let ray = camera.get_ray(center, j, &mut rng.clone());
            assert!(world
                .hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY))
                .is_none());

            let expected = expected_sky(ray.direction());
            assert!((image.get(center, j) - expected).length() < 1e-6);
        }
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let scene = ground_and_sphere();
        let world = build_world(&scene).unwrap();
        let camera = small_camera(&scene.camera, 16, 4, 5);

        let encode = |options: &RenderOptions| {
            let image = render(&camera, &world, options).unwrap();
            let mut bytes = Vec::new();
            write_ppm(&image, &mut bytes).unwrap();
            bytes
        };

        let single = RenderOptions {
            seed: 5,
            threads: Some(1),
            ..Default::default()
        };
        let multi = RenderOptions {
            seed: 5,
            threads: Some(3),
            ..Default::default()
        };
        let other_seed = RenderOptions {
            seed: 6,
            threads: Some(1),
            ..Default::default()
        };

        let first = encode(&single);
        assert_eq!(first, encode(&single));
        assert_eq!(first, encode(&multi));
        assert_ne!(first, encode(&other_seed));
    }

    #[test]
    fn test_cancelled_render() {
        let scene = ground_and_sphere();
        let world = build_world(&scene).unwrap();
        let camera = small_camera(&scene.camera, 8, 1, 2);

        let options = RenderOptions::default();
        options.cancel.cancel();
        assert!(options.cancel.is_cancelled());

        assert!(matches!(
            render(&camera, &world, &options),
            Err(RenderError::Cancelled)
        ));
    }

    #[test]
    fn test_image_buffer() {
        let mut image = ImageBuffer::new(2, 2);
        image.set(1, 0, Color::ONE);

        assert_eq!(image.get(1, 0), Color::ONE);
        assert_eq!(image.get(0, 1), Color::ZERO);
        assert_eq!(image.to_rgb8(), vec![0, 0, 0, 255, 255, 255, 0, 0, 0, 0, 0, 0]);
    }
}
