//! Execution results and reporting

use anyhow::{Context, Result};
use grainbox_core::world::FrameStats;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use super::verification::VerificationResult;

/// Report from a scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResults {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Seed the random feed was created from
    pub seed: u64,

    /// Total frames executed
    pub frames_executed: u64,

    /// Counters accumulated over every frame
    pub stats: FrameStats,

    /// Grains per material after the last frame
    pub population: BTreeMap<String, usize>,

    /// Every verification outcome, in definition order
    pub verifications: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    /// Capture file paths
    pub captures: Vec<String>,

    /// Wall-clock duration of the frame loop (milliseconds)
    pub duration_ms: f64,
}

impl ScenarioResults {
    pub fn new(scenario_name: String, seed: u64) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            seed,
            frames_executed: 0,
            stats: FrameStats::default(),
            population: BTreeMap::new(),
            verifications: Vec::new(),
            log: Vec::new(),
            captures: Vec::new(),
            duration_ms: 0.0,
        }
    }

    /// Verifications that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &VerificationResult> {
        self.verifications.iter().filter(|r| !r.passed)
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{}: {} ({} frames, {}/{} checks, {:.1}ms)",
            self.scenario_name,
            if self.passed { "PASSED" } else { "FAILED" },
            self.frames_executed,
            self.verifications.len() - self.failures().count(),
            self.verifications.len(),
            self.duration_ms
        )
    }

    /// Save report to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize scenario results to JSON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), json).with_context(|| {
            format!("Failed to write scenario results: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Load report from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read results file: {}", path.as_ref().display()))?;

        let results = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON results: {}", path.as_ref().display()))?;

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(passed: bool) -> VerificationResult {
        VerificationResult {
            passed,
            message: "check".to_string(),
            actual_value: None,
        }
    }

    #[test]
    fn test_results_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/run.json");

        let mut results = ScenarioResults::new("Test Scenario".to_string(), 7);
        results.passed = true;
        results.frames_executed = 120;
        results.population.insert("sand".to_string(), 40);
        results.log.push("Test log message".to_string());
        results.save_json(&path).unwrap();

        let loaded = ScenarioResults::from_json(&path).unwrap();
        assert_eq!(loaded.scenario_name, "Test Scenario");
        assert_eq!(loaded.frames_executed, 120);
        assert_eq!(loaded.population.get("sand"), Some(&40));
        assert_eq!(loaded.seed, 7);
    }

    #[test]
    fn test_summary_counts_failures() {
        let mut results = ScenarioResults::new("Demo".to_string(), 1);
        results.verifications = vec![check(true), check(false), check(true)];
        assert_eq!(results.failures().count(), 1);
        assert!(results.summary().starts_with("Demo: FAILED"));
        assert!(results.summary().contains("2/3 checks"));
    }
}
