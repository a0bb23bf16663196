//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use grainbox_core::tools::Emitter;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Grid size; the configured world size when absent
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,

    /// Random seed; the configured seed when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Frames to simulate; the configured count when absent
    #[serde(default)]
    pub frames: Option<u64>,

    /// Grid edits applied before the first frame
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Sources that drop grains before every frame
    #[serde(default)]
    pub emitters: Vec<Emitter>,

    /// Verification checks to run after the last frame
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        let scenario = ron::from_str(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))?;

        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Region;
    use glam::IVec2;
    use grainbox_core::materials::MaterialKind;

    fn sample() -> ScenarioDefinition {
        ScenarioDefinition {
            name: "Test Scenario".to_string(),
            description: "A test scenario".to_string(),
            width: Some(40),
            height: Some(30),
            seed: Some(9),
            frames: Some(60),
            setup: vec![ScenarioAction::Line {
                material: MaterialKind::Wood,
                from: IVec2::new(0, 20),
                to: IVec2::new(39, 20),
                brush_size: 1,
            }],
            emitters: vec![Emitter::new(MaterialKind::Sand, 1, 0, 10, 30)],
            verify: vec![VerificationCondition::RegionEmpty {
                region: Region::Rect {
                    min_x: 0,
                    min_y: 21,
                    max_x: 39,
                    max_y: 29,
                },
            }],
        }
    }

    #[test]
    fn test_scenario_serialization() {
        let scenario = sample();

        let ron = ron::ser::to_string_pretty(&scenario, ron::ser::PrettyConfig::default()).unwrap();
        assert!(ron.contains("Test Scenario"));
        assert!(ron.contains("Line"));

        let deserialized: ScenarioDefinition = ron::from_str(&ron).unwrap();
        assert_eq!(deserialized, scenario);
    }

    #[test]
    fn test_scenario_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.ron");

        sample().to_file(&path).unwrap();
        let loaded = ScenarioDefinition::from_file(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_minimal_scenario_defaults() {
        let scenario: ScenarioDefinition = ron::from_str("(name: \"bare\")").unwrap();
        assert_eq!(scenario.name, "bare");
        assert!(scenario.setup.is_empty());
        assert!(scenario.emitters.is_empty());
        assert_eq!(scenario.seed, None);
    }

    #[test]
    fn test_missing_file_error_names_path() {
        let err = ScenarioDefinition::from_file("does/not/exist.ron").unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.ron"));
    }
}
