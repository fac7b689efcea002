//! Umbra CLI - render signed distance scenes to PNG

mod scenes;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use scenes::Preset;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use umbra_core::prelude::*;

#[derive(Parser)]
#[command(name = "umbra")]
#[command(about = "Sphere tracing of signed distance scenes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a built-in scene to an image file
    Render {
        /// Scene to render
        #[arg(short, long, value_enum, default_value_t = Preset::Twisted)]
        scene: Preset,

        /// Output image file (.png)
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,

        /// Render on the calling thread only
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        settings: Settings,
    },

    /// List the built-in scenes
    Scenes,

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        settings: Settings,
    },
}

/// Configuration file plus per-field overrides
#[derive(Args)]
struct Settings {
    /// JSON configuration file; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width
    #[arg(long)]
    width: Option<u32>,

    /// Image height
    #[arg(long)]
    height: Option<u32>,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Steps before a ray counts as a miss
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Distance that counts as a surface hit
    #[arg(long)]
    hit_epsilon: Option<f64>,

    /// Finite-difference offset for normals
    #[arg(long)]
    normal_epsilon: Option<f64>,

    /// Point light position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    light: Option<Vec<f64>>,

    /// Background color (0-1 per channel)
    #[arg(long, num_args = 3, value_names = ["R", "G", "B"])]
    background: Option<Vec<f64>>,

    /// How per-shape normals are combined
    #[arg(long, value_enum)]
    normal_mode: Option<NormalModeArg>,

    /// Camera position
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    camera: Option<Vec<f64>>,

    /// Use the y-down pixel mapping (row 0 looks toward -Y)
    #[arg(long, overrides_with = "no_flip_y")]
    flip_y: bool,

    /// Use the y-up pixel mapping even when the config file sets flip_y
    #[arg(long, overrides_with = "flip_y")]
    no_flip_y: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum NormalModeArg {
    UnionGradient,
    PerAxisMinimum,
}

impl From<NormalModeArg> for NormalMode {
    fn from(mode: NormalModeArg) -> Self {
        match mode {
            NormalModeArg::UnionGradient => NormalMode::UnionGradient,
            NormalModeArg::PerAxisMinimum => NormalMode::PerAxisMinimum,
        }
    }
}

impl Settings {
    /// Load the configuration file (if any) and apply command-line overrides
    fn resolve(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.march.max_iterations = max_iterations;
        }
        if let Some(hit_epsilon) = self.hit_epsilon {
            config.march.hit_epsilon = hit_epsilon;
        }
        if let Some(normal_epsilon) = self.normal_epsilon {
            config.march.normal_epsilon = normal_epsilon;
        }
        if let Some(light) = &self.light {
            config.march.light_position = vector(light, "--light")?;
        }
        if let Some(background) = &self.background {
            config.march.background = vector(background, "--background")?;
        }
        if let Some(mode) = self.normal_mode {
            config.march.normal_mode = mode.into();
        }
        if let Some(camera) = &self.camera {
            config.camera.origin = vector(camera, "--camera")?;
        }
        if self.flip_y {
            config.camera.flip_y = true;
        } else if self.no_flip_y {
            config.camera.flip_y = false;
        }

        config.validate().context("Invalid configuration")?;
        debug!(?config, "Resolved configuration");
        Ok(config)
    }
}

fn vector(values: &[f64], flag: &str) -> Result<Vector3> {
    match values {
        [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
        _ => bail!("{flag} takes exactly three values"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            scene,
            output,
            sequential,
            settings,
        } => {
            run_render(scene, &output, sequential, &settings)?;
        }
        Commands::Scenes => {
            run_scenes();
        }
        Commands::Config { settings } => {
            run_config(&settings)?;
        }
    }

    Ok(())
}

fn run_render(preset: Preset, output: &Path, sequential: bool, settings: &Settings) -> Result<()> {
    let config = settings.resolve()?;
    let scene = preset.build().context("Failed to build scene")?;

    println!(
        "Rendering {} to {} ({}x{})...",
        preset_name(preset),
        output.display(),
        config.width,
        config.height
    );

    let (image, stats) = if sequential {
        render_sequential(&scene, &config.camera, &config)
    } else {
        render_with_stats(&scene, &config.camera, &config)
    }
    .context("Render failed")?;

    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "took {:?} ({} hits, {} misses)",
        stats.elapsed, stats.hits, stats.misses
    );
    println!("Saved to: {}", output.display());

    Ok(())
}

fn run_scenes() {
    println!("Available scenes:");
    for preset in Preset::value_variants() {
        println!("  {:<10} {}", preset_name(*preset), preset.description());
    }
}

fn run_config(settings: &Settings) -> Result<()> {
    let config = settings.resolve()?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

fn preset_name(preset: Preset) -> String {
    preset
        .to_possible_value()
        .map_or_else(|| format!("{preset:?}"), |value| value.get_name().to_owned())
}
