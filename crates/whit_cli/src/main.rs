use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use whit_renderer::{render, RenderConfig, Scene};
use whit_scene::{load_scene, presets, SceneDescription};

/// Render a scene of spheres, planes and triangles with a recursive ray tracer.
#[derive(Parser, Debug)]
#[command(name = "whit", version, about)]
struct Args {
    /// Built-in scene to render
    #[arg(long, default_value = "solar-system", value_parser = clap::builder::PossibleValuesParser::new(presets::PRESET_NAMES.iter().copied()))]
    scene: String,

    /// JSON scene file; overrides --scene
    #[arg(long)]
    scene_file: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 480)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 270)]
    height: u32,

    /// Samples per pixel (higher means smoother edges)
    #[arg(long, default_value_t = 10)]
    samples: u32,

    /// Maximum number of bounces per path
    #[arg(long, default_value_t = 10)]
    max_depth: u32,

    /// Seed for the random sampler
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Output image; the extension picks the format (.png, .ppm)
    #[arg(short, long, default_value = "demo.png")]
    output: PathBuf,
}

impl Args {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            seed: self.seed,
        }
    }

    fn scene_description(&self) -> Result<SceneDescription> {
        match &self.scene_file {
            Some(path) => load_scene(path)
                .with_context(|| format!("Failed to load scene file {}", path.display())),
            None => presets::by_name(&self.scene)
                .ok_or_else(|| anyhow!("Unknown scene '{}'", self.scene)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::debug!("{:?}", args);

    let config = args.render_config();
    config.validate().context("Invalid render settings")?;

    let description = args.scene_description()?;
    let (scene, camera) = Scene::from_description(&description, config.aspect_ratio())
        .with_context(|| format!("Failed to build scene '{}'", description.name))?;

    let image = render(&camera, &scene, &config).context("Render failed")?;
    image
        .save(&args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
