//! Random sampling for ray tracing.
//!
//! Every function takes the generator explicitly so each render worker can
//! own its own seeded stream. Works with `&mut dyn RngCore` as well as
//! concrete generators.

use glam::Vec3;
use rand::Rng;

/// Generate a random f32 in [0.0, 1.0)
#[inline]
pub fn random_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random f32 in [min, max)
#[inline]
pub fn random_f32_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + (max - min) * random_f32(rng)
}

/// Random vector with each component in [0.0, 1.0)
pub fn random_vec3<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(random_f32(rng), random_f32(rng), random_f32(rng))
}

/// Random vector with each component independently in [min, max)
pub fn random_vec3_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> Vec3 {
    Vec3::new(
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
        random_f32_range(rng, min, max),
    )
}

/// Random point strictly inside the unit ball.
///
/// Rejection-samples the [-1, 1) cube; about two draws on average.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        // A sample right at the origin has no direction
        if let Some(v) = random_in_unit_sphere(rng).try_normalize() {
            return v;
        }
    }
}

/// Random unit vector on the hemisphere around `normal`.
pub fn random_on_hemisphere<R: Rng + ?Sized>(rng: &mut R, normal: Vec3) -> Vec3 {
    let on_unit_sphere = random_unit_vector(rng);
    if on_unit_sphere.dot(normal) > 0.0 {
        on_unit_sphere
    } else {
        -on_unit_sphere
    }
}

/// Random point inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f32_range(rng, -1.0, 1.0),
            random_f32_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
