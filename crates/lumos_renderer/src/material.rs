//! Surface scattering materials.

use lumos_core::MaterialDescription;
use lumos_math::random::{random_f32, random_unit_vector};
use lumos_math::{reflect, refract, Color, Ray, Vec3Ext};
use rand::RngCore;

use crate::{hittable::HitRecord, ConfigError};

/// Result of a successful scatter: the bounce ray and how much it is dimmed.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// How a surface scatters incoming light.
///
/// The set of behaviors is closed, so dispatch is an exhaustive match
/// rather than a trait object.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Material {
    /// No material. Absorbs everything; never appears on a sphere built
    /// from a valid scene.
    #[default]
    Absent,

    /// Diffuse (Lambertian) surface.
    Lambertian { albedo: Color },

    /// Reflective metal. `fuzz` 0.0 = perfect mirror, 1.0 = very rough.
    Metal { albedo: Color, fuzz: f32 },

    /// Clear dielectric (glass, water).
    /// `refraction_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond.
    Dielectric { refraction_index: f32 },
}

impl Material {
    /// Create a new Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a new Metal material. Fuzz is clamped to [0, 1].
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a new Dielectric material.
    pub fn dielectric(refraction_index: f32) -> Self {
        Material::Dielectric { refraction_index }
    }

    /// Convert a scene description material, validating its parameters.
    pub fn from_description(desc: &MaterialDescription) -> Result<Self, ConfigError> {
        match *desc {
            MaterialDescription::Lambertian { albedo } => Ok(Self::lambertian(albedo)),
            MaterialDescription::Metal { albedo, fuzz } => {
                if !fuzz.is_finite() {
                    return Err(ConfigError::InvalidFuzz(fuzz));
                }
                Ok(Self::metal(albedo, fuzz))
            }
            MaterialDescription::Dielectric { refraction_index } => {
                if !(refraction_index > 0.0 && refraction_index.is_finite()) {
                    return Err(ConfigError::InvalidRefractionIndex(refraction_index));
                }
                Ok(Self::dielectric(refraction_index))
            }
        }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match *self {
            Material::Absent => None,

            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_unit_vector(rng);

                // Catch degenerate scatter direction
                if scatter_direction.near_zero() {
                    scatter_direction = rec.normal;
                }

                Some(ScatterResult {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }

            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(ray_in.direction(), rec.normal).normalize_or_zero()
                    + fuzz * random_unit_vector(rng);

                // Fuzz can push the ray below the surface; it is absorbed then
                if reflected.dot(rec.normal) > 0.0 {
                    Some(ScatterResult {
                        attenuation: albedo,
                        scattered: Ray::new(rec.p, reflected),
                    })
                } else {
                    None
                }
            }

            Material::Dielectric { refraction_index } => {
                let ri = if rec.front_face {
                    1.0 / refraction_index
                } else {
                    refraction_index
                };

                let unit_direction = ray_in.direction().normalize_or_zero();
                let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
                let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

                // Check for total internal reflection
                let cannot_refract = ri * sin_theta > 1.0;

                let direction = if cannot_refract || reflectance(cos_theta, ri) > random_f32(rng) {
                    reflect(unit_direction, rec.normal)
                } else {
                    refract(unit_direction, rec.normal, ri)
                };

                Some(ScatterResult {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, direction),
                })
            }
        }
    }
}

/// Schlick's approximation for reflectance.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = ((1.0 - refraction_index) / (1.0 + refraction_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
