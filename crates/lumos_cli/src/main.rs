use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use lumos_core::{load_scene, SceneDescription};
use lumos_renderer::{build_world, render, save_image, write_ppm, Camera, RenderOptions};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays a clean image stream
    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let mut scene = load(&args)?;
    args.apply_overrides(&mut scene.camera);

    let world = build_world(&scene).context("Invalid scene")?;
    let camera = Camera::new(&scene.camera).context("Invalid camera settings")?;

    let options = RenderOptions {
        seed: args.seed,
        threads: args.threads,
        ..Default::default()
    };
    let image = render(&camera, &world, &options)?;

    if args.to_stdout() {
        let mut out = BufWriter::new(io::stdout().lock());
        write_ppm(&image, &mut out).context("Failed to write image to stdout")?;
    } else {
        save_image(&image, &args.output)
            .with_context(|| format!("Failed to save {}", args.output.display()))?;
    }

    Ok(())
}

fn load(args: &Args) -> Result<SceneDescription> {
    match &args.file {
        Some(path) => {
            load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))
        }
        None => {
            let preset = args.preset();
            log::info!("Using built-in scene {:?}", preset);
            Ok(preset.build(args.seed))
        }
    }
}
