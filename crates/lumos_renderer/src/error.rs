//! Error types for world construction and rendering.

use thiserror::Error;

/// Invalid camera or scene parameters, rejected before rendering starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Image width must be at least 1")]
    ZeroImageWidth,

    #[error("Aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Vertical field of view must be between 0 and 180 degrees, got {0}")]
    InvalidFov(f32),

    #[error("Defocus angle must be non-negative, got {0}")]
    InvalidDefocusAngle(f32),

    #[error("Focus distance must be positive, got {0}")]
    InvalidFocusDistance(f32),

    #[error("Camera lookfrom and lookat must be different points")]
    DegenerateView,

    #[error("Camera up vector is parallel to the view direction")]
    DegenerateUp,

    #[error("Sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("Refraction index must be positive, got {0}")]
    InvalidRefractionIndex(f32),

    #[error("Metal fuzz must be finite, got {0}")]
    InvalidFuzz(f32),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render cancelled")]
    Cancelled,

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
