use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumos_core::{CameraSettings, Preset};

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    ThreeSpheres,
    RandomSpheres,
    GroundAndSphere,
}

impl From<ScenePreset> for Preset {
    fn from(preset: ScenePreset) -> Self {
        match preset {
            ScenePreset::ThreeSpheres => Preset::ThreeSpheres,
            ScenePreset::RandomSpheres => Preset::RandomSpheres,
            ScenePreset::GroundAndSphere => Preset::GroundAndSphere,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "lumos")]
#[command(about = "An offline path tracer for spheres")]
pub struct Args {
    /// Built-in scene to render (defaults to three-spheres)
    #[arg(long, value_enum, conflicts_with = "file")]
    pub scene: Option<ScenePreset>,

    /// JSON scene description to render
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output path: `-` for PPM on stdout, `.png` for PNG, anything else PPM
    #[arg(short, long, default_value = "-")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub spp: Option<u32>,

    /// Maximum ray bounces
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Random seed; the same seed renders the same image
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn preset(&self) -> Preset {
        self.scene.unwrap_or(ScenePreset::ThreeSpheres).into()
    }

    /// Whether the image goes to stdout.
    pub fn to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    /// Apply the command line overrides on top of a scene's camera.
    pub fn apply_overrides(&self, camera: &mut CameraSettings) {
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(spp) = self.spp {
            camera.samples_per_pixel = spp;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
    }
}
