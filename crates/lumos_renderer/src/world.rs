//! Turning a scene description into renderable geometry.

use std::collections::HashMap;
use std::sync::Arc;

use lumos_core::SceneDescription;

use crate::{ConfigError, HittableList, Material, Sphere};

/// Build the world for a scene.
///
/// Each named material is converted once and shared by every sphere that
/// refers to it.
pub fn build_world(scene: &SceneDescription) -> Result<HittableList, ConfigError> {
    let materials = scene
        .materials
        .iter()
        .map(|(name, desc)| Ok((name.as_str(), Arc::new(Material::from_description(desc)?))))
        .collect::<Result<HashMap<_, _>, ConfigError>>()?;

    let mut world = HittableList::new();
    for sphere in &scene.spheres {
        let material = materials
            .get(sphere.material.as_str())
            .ok_or_else(|| ConfigError::UnknownMaterial(sphere.material.clone()))?;
        world.add(Box::new(Sphere::new(
            sphere.center,
            sphere.radius,
            Arc::clone(material),
        )?));
    }

    log::info!(
        "Built world '{}': {} spheres, {} materials",
        scene.name,
        world.len(),
        materials.len()
    );
    Ok(world)
}
