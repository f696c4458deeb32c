//! Camera for ray generation.

use crate::ConfigError;
use lumos_core::CameraSettings;
use lumos_math::random::{random_f32, random_in_unit_disk};
use lumos_math::{Point3, Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
///
/// All geometry is derived once in [`Camera::new`] and never changes while
/// rendering, so one camera is shared read-only by every render thread.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    defocus_angle: f32, // Variation angle of rays through each pixel

    // Derived values
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
    samples_scale: f32,
}

impl Camera {
    /// Validate the settings and derive the viewport geometry.
    pub fn new(settings: &CameraSettings) -> Result<Self, ConfigError> {
        validate(settings)?;

        let image_width = settings.image_width;
        let image_height = image_height_for(image_width, settings.aspect_ratio);
        let center = settings.lookfrom;

        // Calculate viewport dimensions
        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * settings.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Calculate camera basis vectors
        let w = (settings.lookfrom - settings.lookat)
            .try_normalize()
            .ok_or(ConfigError::DegenerateView)?;
        let u = settings
            .vup
            .cross(w)
            .try_normalize()
            .ok_or(ConfigError::DegenerateUp)?;
        let v = w.cross(u);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left =
            center - settings.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius =
            settings.focus_dist * (settings.defocus_angle.to_radians() / 2.0).tan();

        Ok(Self {
            image_width,
            image_height,
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            defocus_angle: settings.defocus_angle,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
            samples_scale: 1.0 / settings.samples_per_pixel as f32,
        })
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// `i` counts columns from the left, `j` rows from the top.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f32 {
        self.samples_scale
    }

    /// Camera center (the lookfrom point).
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Camera basis `(u, v, w)`: right, up and backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Center of the top-left pixel.
    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    /// Offsets between neighboring pixels, horizontally and vertically.
    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }

    /// Defocus disk axes; zero length when depth of field is off.
    pub fn defocus_disk(&self) -> (Vec3, Vec3) {
        (self.defocus_disk_u, self.defocus_disk_v)
    }
}

/// Image height for a width and aspect ratio, never less than 1.
pub fn image_height_for(image_width: u32, aspect_ratio: f32) -> u32 {
    ((image_width as f32 / aspect_ratio) as u32).max(1)
}

fn validate(settings: &CameraSettings) -> Result<(), ConfigError> {
    if settings.image_width == 0 {
        return Err(ConfigError::ZeroImageWidth);
    }
    if !(settings.aspect_ratio > 0.0 && settings.aspect_ratio.is_finite()) {
        return Err(ConfigError::InvalidAspectRatio(settings.aspect_ratio));
    }
    if settings.samples_per_pixel == 0 {
        return Err(ConfigError::ZeroSamples);
    }
    if !(settings.vfov > 0.0 && settings.vfov < 180.0) {
        return Err(ConfigError::InvalidFov(settings.vfov));
    }
    if !(settings.defocus_angle >= 0.0 && settings.defocus_angle < 180.0) {
        return Err(ConfigError::InvalidDefocusAngle(settings.defocus_angle));
    }
    if !(settings.focus_dist > 0.0 && settings.focus_dist.is_finite()) {
        return Err(ConfigError::InvalidFocusDistance(settings.focus_dist));
    }
    Ok(())
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f32(rng) - 0.5, random_f32(rng) - 0.5, 0.0)
}
