//! Scene description types for Lumos.
//!
//! These types describe *what* to render and are independent of the
//! renderer's runtime representation. They serialize to and from JSON.

use std::collections::BTreeMap;

use lumos_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Placement, lens and quality settings for the camera.
///
/// Angles are in degrees. Every field has a default, so a scene file only
/// needs to list what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Rendered image width in pixels
    pub image_width: u32,

    /// Ratio of image width over height
    pub aspect_ratio: f32,

    /// Random samples for each pixel
    pub samples_per_pixel: u32,

    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    /// Vertical field of view
    pub vfov: f32,

    /// Point the camera is looking from
    pub lookfrom: Point3,

    /// Point the camera is looking at
    pub lookat: Point3,

    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel (0 disables depth of field)
    pub defocus_angle: f32,

    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 1.0,
        }
    }
}

/// How a surface scatters light.
///
/// Serialized with a `type` tag, e.g.
/// `{"type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.2}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Diffuse surface
    Lambertian { albedo: Color },

    /// Reflective surface; `fuzz` 0 is a perfect mirror
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },

    /// Clear refractive surface (glass, water, air bubbles)
    Dielectric { refraction_index: f32 },
}

/// A sphere bound to a named material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Point3,
    pub radius: f32,

    /// Key into [`SceneDescription::materials`]
    pub material: String,
}

/// A complete scene: camera, materials and spheres.
///
/// Materials are named so that many spheres can share one material value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Scene name (usually from filename)
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub camera: CameraSettings,

    /// Materials by name
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialDescription>,

    /// Spheres in insertion order
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Create an empty scene with default camera settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Replace the camera settings.
    pub fn with_camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    /// Add (or replace) a named material.
    pub fn add_material(&mut self, name: impl Into<String>, material: MaterialDescription) {
        self.materials.insert(name.into(), material);
    }

    /// Add a sphere referencing a material by name.
    pub fn add_sphere(&mut self, center: Point3, radius: f32, material: impl Into<String>) {
        self.spheres.push(SphereDescription {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Get a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDescription> {
        self.materials.get(name)
    }

    /// Names of spheres' materials that are not defined in the scene.
    pub fn missing_materials(&self) -> Vec<&str> {
        let mut missing: Vec<&str> = self
            .spheres
            .iter()
            .map(|s| s.material.as_str())
            .filter(|name| !self.materials.contains_key(*name))
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
