//! Vector aliases and the few operations glam doesn't provide.
//!
//! Normalization comes straight from glam: `try_normalize` where a zero
//! vector must be reported, `normalize_or_zero` where a zero result is an
//! acceptable answer.

use glam::Vec3;

/// A point in 3D space.
pub type Point3 = Vec3;

/// Linear RGB color (values typically 0-1).
pub type Color = Vec3;

/// Components below this magnitude count as zero in [`Vec3Ext::near_zero`].
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Extra vector queries used by the scattering code.
pub trait Vec3Ext {
    /// True if every component's magnitude is below [`NEAR_ZERO_EPSILON`].
    fn near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().max_element() < NEAR_ZERO_EPSILON
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refraction indices on the incoming and
/// outgoing sides.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-3, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1.0).near_zero());
    }

    #[test]
    fn test_reflect_flips_normal_component() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let vs = [
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.3, -2.0, 0.7),
            Vec3::new(-0.5, 0.25, 4.0),
        ];
        for v in vs {
            let r = reflect(v, n);
            assert!((r.dot(n) + v.dot(n)).abs() < 1e-6);
            // Tangential part is untouched
            assert!((r.x - v.x).abs() < 1e-6 && (r.z - v.z).abs() < 1e-6);
        }

        let tilted = Vec3::new(1.0, 2.0, -0.5).normalize();
        let v = Vec3::new(-0.2, 0.9, 1.3);
        assert!((reflect(v, tilted).dot(tilted) + v.dot(tilted)).abs() < 1e-5);
    }

    #[test]
    fn test_refract_with_unit_ratio_keeps_direction() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let uv = Vec3::new(0.6, -0.8, 0.0);
        let out = refract(uv, n, 1.0);
        assert!((out - uv).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_toward_normal_entering_denser_medium() {
        let n = Vec3::new(0.0, 1.0, 0.0);
        let uv = Vec3::new(0.6, -0.8, 0.0);
        let out = refract(uv, n, 1.0 / 1.5);
        // sin(theta_t) = sin(theta_i) / 1.5
        assert!((out.x - 0.4).abs() < 1e-5);
        assert!(out.y < 0.0);
        assert!((out.length() - 1.0).abs() < 1e-5);
    }
}
