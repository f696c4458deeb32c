//! Lumos Core - Scene description types for the Lumos path tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraSettings`,
//!   `MaterialDescription`, `SphereDescription`
//! - **Scene files**: JSON loading with material reference checks
//! - **Presets**: built-in scenes that need no file
//!
//! # Example
//!
//! ```ignore
//! use lumos_core::load_scene;
//!
//! let scene = load_scene("scenes/three_spheres.json")?;
//! println!("Loaded {} spheres, {} materials",
//!     scene.sphere_count(),
//!     scene.material_count());
//! ```

pub mod loader;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use loader::{load_scene, load_scene_from_str, LoadError, LoadResult};
pub use presets::Preset;
pub use scene::{CameraSettings, MaterialDescription, SceneDescription, SphereDescription};
