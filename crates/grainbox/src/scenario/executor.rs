//! Scenario execution engine

use anyhow::{Context, Result};
use grainbox_core::world::{FrameStats, Grid, PowderWorld};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::path::PathBuf;
use std::time::Instant;

use super::definition::ScenarioDefinition;
use super::results::ScenarioResults;
use crate::capture;
use crate::config::AppConfig;

/// Settings a scenario falls back on, plus command-line overrides
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub frames: u64,

    /// Beat the scenario's own seed and frame count
    pub seed_override: Option<u64>,
    pub frames_override: Option<u64>,

    /// Pixels per cell in captures
    pub scale: u32,
    /// Capture every N frames (0 = final frame only)
    pub capture_every: u64,
    /// Capture directory; no captures when absent
    pub output_dir: Option<PathBuf>,
}

impl RunSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            width: config.world.width,
            height: config.world.height,
            seed: config.simulation.seed,
            frames: config.simulation.frames,
            seed_override: None,
            frames_override: None,
            scale: config.render.scale,
            capture_every: config.render.capture_every,
            output_dir: Some(config.output.directory.clone()),
        }
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        let mut settings = Self::from_config(&AppConfig::default());
        settings.output_dir = None;
        settings
    }
}

/// Builds a world from a scenario, runs it and checks the outcome
pub struct ScenarioExecutor {
    settings: RunSettings,

    /// Action execution log
    log: Vec<String>,
}

impl ScenarioExecutor {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            settings,
            log: Vec::new(),
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Empty world sized by the scenario, or the configured size
    pub fn build_world(&self, scenario: &ScenarioDefinition) -> Result<PowderWorld> {
        let width = scenario.width.unwrap_or(self.settings.width);
        let height = scenario.height.unwrap_or(self.settings.height);
        let grid = Grid::try_new(width, height)
            .with_context(|| format!("Invalid world size for scenario '{}'", scenario.name))?;
        Ok(PowderWorld::from_grid(grid))
    }

    /// Execute a complete scenario against a freshly built world
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
    ) -> Result<(PowderWorld, ScenarioResults)> {
        let mut world = self.build_world(scenario)?;
        let results = self.execute_in(scenario, &mut world)?;
        Ok((world, results))
    }

    /// Execute a scenario against an existing world
    pub fn execute_in(
        &mut self,
        scenario: &ScenarioDefinition,
        world: &mut PowderWorld,
    ) -> Result<ScenarioResults> {
        let seed = self
            .settings
            .seed_override
            .or(scenario.seed)
            .unwrap_or(self.settings.seed);
        let frames = self
            .settings
            .frames_override
            .or(scenario.frames)
            .unwrap_or(self.settings.frames);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let mut results = ScenarioResults::new(scenario.name.clone(), seed);

        self.log.clear();
        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }
        self.log(&format!(
            "World {}x{}, seed {seed}, {frames} frames",
            world.grid().width(),
            world.grid().height()
        ));

        // Setup
        for (idx, action) in scenario.setup.iter().enumerate() {
            let done = action
                .apply(world.grid_mut(), &mut rng)
                .with_context(|| format!("Setup action {idx} failed"))?;
            self.log(&format!("  {done}"));
        }
        let baseline = world.population();

        // Frames
        let start = Instant::now();
        let mut stats = FrameStats::default();
        for _ in 0..frames {
            for emitter in &scenario.emitters {
                emitter.emit(world.grid_mut(), &mut rng);
            }
            world.step(&mut rng, &mut stats);

            let frame = world.frame();
            if frame % 100 == 0 {
                log::debug!("frame {frame}: {stats}");
            }
            if self.settings.capture_every > 0 && frame % self.settings.capture_every == 0 {
                self.capture(world, scenario, &format!("frame_{frame:05}"), &mut results)?;
            }
        }
        results.duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        results.frames_executed = frames;
        results.stats = stats;
        self.capture(world, scenario, "final", &mut results)?;

        // Verification
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(world, &baseline);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));
                results.verifications.push(result);
            }
        }

        results.population = world
            .population()
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect();
        let passed = results.failures().next().is_none();
        results.passed = passed;
        self.log(&format!("Scenario complete: {}", results.summary()));
        self.log(&format!("  Totals: {stats}"));
        results.log = self.log.clone();

        Ok(results)
    }

    fn capture(
        &mut self,
        world: &PowderWorld,
        scenario: &ScenarioDefinition,
        label: &str,
        results: &mut ScenarioResults,
    ) -> Result<()> {
        let Some(dir) = &self.settings.output_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{}_{label}.png", file_stem(&scenario.name)));
        capture::capture_grid(world.grid(), self.settings.scale, &path)?;

        let path = path.display().to_string();
        self.log(&format!("  Capture saved: {path}"));
        results.captures.push(path);
        Ok(())
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

/// Lowercase file-name-safe form of a scenario name
fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "scenario".to_string()
    } else {
        stem
    }
}
