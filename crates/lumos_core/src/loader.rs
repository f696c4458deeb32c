//! Scene file loading.
//!
//! Scene files are JSON documents deserializing into [`SceneDescription`].
//! Loading fails early when a sphere names a material that isn't defined,
//! so the renderer never sees a dangling reference.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::scene::SceneDescription;

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material reference: {0}")]
    UnknownMaterial(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a scene file.
///
/// The scene name defaults to the file stem when the file doesn't set one.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let mut scene = load_scene_from_str(&source)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} spheres, {} materials",
        scene.name,
        path.display(),
        scene.sphere_count(),
        scene.material_count()
    );

    Ok(scene)
}

/// Parse a scene from a JSON string.
pub fn load_scene_from_str(source: &str) -> LoadResult<SceneDescription> {
    let scene: SceneDescription = serde_json::from_str(source)?;

    if let Some(name) = scene.missing_materials().first() {
        return Err(LoadError::UnknownMaterial((*name).to_string()));
    }

    if scene.spheres.is_empty() {
        log::warn!("Scene '{}' has no spheres, only the sky will render", scene.name);
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MaterialDescription;
    use lumos_math::{Color, Point3};

    const SIMPLE_SCENE: &str = r#"{
        "name": "simple",
        "camera": { "image_width": 64, "samples_per_pixel": 4 },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "glass": { "type": "dielectric", "refraction_index": 1.5 }
        },
        "spheres": [
            { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": "glass" },
            { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": "glass" }
        ]
    }"#;

    #[test]
    fn test_load_simple_scene() {
        let scene = load_scene_from_str(SIMPLE_SCENE).unwrap();

        assert_eq!(scene.name, "simple");
        assert_eq!(scene.camera.image_width, 64);
        assert_eq!(scene.camera.samples_per_pixel, 4);
        assert_eq!(scene.sphere_count(), 3);
        assert_eq!(scene.material_count(), 2);
        assert_eq!(scene.spheres[0].center, Point3::new(0.0, -100.5, -1.0));
        assert_eq!(
            scene.material("ground"),
            Some(&MaterialDescription::Lambertian {
                albedo: Color::new(0.8, 0.8, 0.0)
            })
        );
    }

    #[test]
    fn test_unknown_material() {
        let source = r#"{
            "spheres": [ { "center": [0, 0, 0], "radius": 1.0, "material": "nope" } ]
        }"#;

        match load_scene_from_str(source) {
            Err(LoadError::UnknownMaterial(name)) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            load_scene_from_str("{ \"spheres\": [ }"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_scene("does/not/exist.json"),
            Err(LoadError::Io(_))
        ));
    }

    #[test]
    fn test_load_scene_names_from_file_stem() {
        let path = std::env::temp_dir().join(format!("lumos_loader_{}.json", std::process::id()));
        fs::write(&path, r#"{ "spheres": [] }"#).unwrap();

        let scene = load_scene(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(scene.name, format!("lumos_loader_{}", std::process::id()));
        assert_eq!(scene.sphere_count(), 0);
    }
}
