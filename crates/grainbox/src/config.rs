//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `grainbox.ron` file (if exists)
//! 3. Environment variables prefixed with `GRAINBOX_`
//!
//! Example environment variable: `GRAINBOX_SIMULATION__SEED=7`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Grid dimensions used when a scenario does not set its own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 200,
        }
    }
}

/// Run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the random feed
    pub seed: u64,
    /// Frames to simulate
    pub frames: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            frames: 600,
        }
    }
}

/// PNG capture settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output pixels per grid cell
    pub scale: u32,
    /// Capture every N frames in addition to the final frame (0 = final only)
    pub capture_every: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 3,
            capture_every: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for captures and run reports
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("grainbox_output"),
        }
    }
}

impl AppConfig {
    /// Load configuration from `grainbox.ron` in the working directory
    pub fn load() -> Result<Self> {
        Self::load_from("grainbox")
    }

    /// Load configuration with an explicit config file name (extension optional)
    pub fn load_from(name: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.width", 300_i64)?
            .set_default("world.height", 200_i64)?
            .set_default("simulation.seed", 42_i64)?
            .set_default("simulation.frames", 600_i64)?
            .set_default("render.scale", 3_i64)?
            .set_default("render.capture_every", 0_i64)?
            .set_default("output.directory", "grainbox_output")?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(name)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (GRAINBOX_WORLD__WIDTH, etc.)
            .add_source(
                Environment::with_prefix("GRAINBOX")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
