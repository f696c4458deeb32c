//! Built-in scenes.

use lumos_math::random::{random_f32, random_f32_range, random_vec3, random_vec3_range};
use lumos_math::{Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::scene::{CameraSettings, MaterialDescription, SceneDescription};

/// A scene that ships with the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Ground, a diffuse sphere, a hollow glass sphere and a fuzzy metal sphere
    ThreeSpheres,
    /// Grid of small random spheres around three large feature spheres
    RandomSpheres,
    /// A single diffuse sphere resting on a huge ground sphere
    GroundAndSphere,
}

impl Preset {
    /// Build the scene. `seed` only affects [`Preset::RandomSpheres`].
    pub fn build(self, seed: u64) -> SceneDescription {
        match self {
            Preset::ThreeSpheres => three_spheres(),
            Preset::RandomSpheres => random_spheres(seed),
            Preset::GroundAndSphere => ground_and_sphere(),
        }
    }
}

/// Ground, diffuse center, glass sphere with an air bubble, fuzzy metal.
pub fn three_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new("three_spheres").with_camera(CameraSettings {
        vfov: 20.0,
        lookfrom: Point3::new(-2.0, 2.0, 1.0),
        lookat: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
        ..Default::default()
    });

    scene.add_material(
        "ground",
        MaterialDescription::Lambertian {
            albedo: Color::new(0.8, 0.8, 0.0),
        },
    );
    scene.add_material(
        "center",
        MaterialDescription::Lambertian {
            albedo: Color::new(0.1, 0.2, 0.5),
        },
    );
    scene.add_material(
        "glass",
        MaterialDescription::Dielectric {
            refraction_index: 1.5,
        },
    );
    scene.add_material(
        "bubble",
        MaterialDescription::Dielectric {
            refraction_index: 1.0 / 1.5,
        },
    );
    scene.add_material(
        "gold",
        MaterialDescription::Metal {
            albedo: Color::new(0.8, 0.6, 0.2),
            fuzz: 0.2,
        },
    );

    scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground");
    scene.add_sphere(Point3::new(0.0, 0.0, -1.2), 0.5, "center");
    scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass");
    scene.add_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, "bubble");
    scene.add_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, "gold");

    scene
}

/// 22x22 grid of small spheres (70% diffuse, 20% metal, 10% glass) around
/// three large spheres, seen through a shallow depth of field.
pub fn random_spheres(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = SceneDescription::new("random_spheres").with_camera(CameraSettings {
        vfov: 20.0,
        lookfrom: Point3::new(13.0, 2.0, 3.0),
        lookat: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        ..Default::default()
    });

    scene.add_material(
        "ground",
        MaterialDescription::Lambertian {
            albedo: Color::splat(0.5),
        },
    );
    scene.add_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, "ground");

    // Small glass spheres all share one material
    scene.add_material(
        "glass",
        MaterialDescription::Dielectric {
            refraction_index: 1.5,
        },
    );

    let keep_clear = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let center = Point3::new(
                a as f32 + 0.9 * random_f32(&mut rng),
                0.2,
                b as f32 + 0.9 * random_f32(&mut rng),
            );
            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let choose_mat = random_f32(&mut rng);
            let name = if choose_mat < 0.7 {
                let name = format!("diffuse_{}_{}", a, b);
                let albedo = random_vec3(&mut rng) * random_vec3(&mut rng);
                scene.add_material(name.clone(), MaterialDescription::Lambertian { albedo });
                name
            } else if choose_mat < 0.9 {
                let name = format!("metal_{}_{}", a, b);
                let albedo = random_vec3_range(&mut rng, 0.5, 1.0);
                let fuzz = random_f32_range(&mut rng, 0.0, 0.5);
                scene.add_material(name.clone(), MaterialDescription::Metal { albedo, fuzz });
                name
            } else {
                "glass".to_string()
            };

            scene.add_sphere(center, 0.2, name);
        }
    }

    scene.add_material(
        "brown",
        MaterialDescription::Lambertian {
            albedo: Color::new(0.4, 0.2, 0.1),
        },
    );
    scene.add_material(
        "mirror",
        MaterialDescription::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        },
    );
    scene.add_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, "glass");
    scene.add_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, "brown");
    scene.add_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, "mirror");

    log::debug!("Generated {} random spheres", scene.sphere_count());
    scene
}

/// Gray sphere at (0, 0, -1) on a ground sphere, camera at the origin
/// looking down -Z.
pub fn ground_and_sphere() -> SceneDescription {
    let mut scene = SceneDescription::new("ground_and_sphere").with_camera(CameraSettings {
        vfov: 90.0,
        lookfrom: Point3::ZERO,
        lookat: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 0.0,
        focus_dist: 1.0,
        ..Default::default()
    });

    scene.add_material(
        "gray",
        MaterialDescription::Lambertian {
            albedo: Color::splat(0.5),
        },
    );
    scene.add_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, "gray");
    scene.add_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "gray");

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_have_no_dangling_materials() {
        for preset in [
            Preset::ThreeSpheres,
            Preset::RandomSpheres,
            Preset::GroundAndSphere,
        ] {
            let scene = preset.build(1);
            assert!(scene.missing_materials().is_empty(), "{:?}", preset);
            assert!(scene.sphere_count() > 0);
        }
    }

    #[test]
    fn test_three_spheres_layout() {
        let scene = three_spheres();
        assert_eq!(scene.sphere_count(), 5);
        assert_eq!(scene.material_count(), 5);
        assert_eq!(scene.camera.focus_dist, 3.4);
    }

    #[test]
    fn test_random_spheres_is_seeded() {
        let a = random_spheres(7);
        let b = random_spheres(7);
        let c = random_spheres(8);

        assert_eq!(a, b);
        assert_ne!(a, c);
        // Ground plus three feature spheres plus most of the grid
        assert!(a.sphere_count() > 400);
    }

    #[test]
    fn test_random_spheres_keeps_clear_of_metal_sphere() {
        let scene = random_spheres(3);
        let keep_clear = Point3::new(4.0, 0.2, 0.0);
        for sphere in scene.spheres.iter().filter(|s| s.radius == 0.2) {
            assert!((sphere.center - keep_clear).length() > 0.9);
        }
    }
}
